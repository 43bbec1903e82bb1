use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn format_brl(value: &Decimal) -> String {
    format!("R$ {:.2}", value)
}

pub fn format_rate(rate: &Decimal) -> String {
    format!("{:.2}%", rate * dec!(100))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
