#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use strum::IntoEnumIterator;
    use tempfile::{TempDir, tempdir};

    use crate::{
        api::{
            WalletApi,
            dto::InvestmentRequestDto,
            utils::{expect_success, parse_response, text_response},
        },
        models::{Asset, AssetType, Investment},
        session::{Session, TokenStore},
    };

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    fn api_without_token() -> (TempDir, WalletApi) {
        let dir = tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("session.json")));
        // Unroutable on purpose; the calls under test must fail before
        // any connection is attempted
        let api = WalletApi::new("http://127.0.0.1:9/api/v1".to_string(), session);
        (dir, api)
    }

    #[tokio::test]
    async fn authenticated_calls_fail_without_token() {
        let (_dir, api) = api_without_token();

        let err = api.list_assets().await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");

        let err = api.list_investments().await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");

        let err = api.list_history().await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");

        let err = api.total_balance().await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");

        let err = api.future_balance().await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");

        let err = api.create_investment(dec!(100), "a1").await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");

        let err = api.withdraw_investment("i1").await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");

        let err = api.remove_investment("i1").await.unwrap_err();
        assert_eq!(err.to_string(), "No auth token found");
    }

    #[tokio::test]
    async fn failed_response_prefers_the_server_message() {
        let res = response(400, r#"{"message":"Saldo insuficiente"}"#);
        let err = parse_response::<Vec<Asset>>(res, "Failed to fetch assets")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Saldo insuficiente");

        let res = response(409, r#"{"message":"Investimento já resgatado"}"#);
        let err = expect_success(res, "Failed to withdraw investment")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Investimento já resgatado");
    }

    #[tokio::test]
    async fn failed_response_without_message_uses_the_fallback() {
        // Plain-text body
        let res = response(500, "Internal Server Error");
        let err = parse_response::<Vec<Asset>>(res, "Failed to fetch assets")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch assets");

        // JSON body without a message field
        let res = response(500, r#"{"error":"boom"}"#);
        let err = expect_success(res, "Failed to register investment")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to register investment");
    }

    #[tokio::test]
    async fn successful_response_body_is_parsed() {
        let res = response(
            200,
            r#"[{
                "id": "a1",
                "name": "Banco Inter CDB",
                "assetType": "CDB",
                "profitability": 0.12,
                "maturityDate": "2027-06-30"
            }]"#,
        );
        let assets: Vec<Asset> = parse_response(res, "Failed to fetch assets").await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name(), "Banco Inter CDB");

        let res = response(200, "R$ 1.234,56");
        let report = text_response(res, "Failed to fetch report").await.unwrap();
        assert_eq!(report, "R$ 1.234,56");
    }

    #[tokio::test]
    async fn body_failure_mid_read_reports_a_network_error() {
        let chunks = futures::stream::iter(vec![
            Ok::<&'static [u8], std::io::Error>(&b"["[..]),
            Err(std::io::Error::other("connection reset")),
        ]);
        let res: reqwest::Response = http::Response::builder()
            .status(200)
            .body(reqwest::Body::wrap_stream(chunks))
            .unwrap()
            .into();

        let err = parse_response::<Vec<Asset>>(res, "Failed to fetch assets")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Network error. Please check your connection.");
    }

    #[test]
    fn investment_request_uses_wire_field_names() {
        let body = InvestmentRequestDto::new(dec!(500), "a1".to_string());

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["assetId"], "a1");
        assert_eq!(json["initialValue"].as_f64(), Some(500.0));
    }

    #[test]
    fn asset_deserializes_from_backend_json() {
        let json = r#"{
            "id": "a1",
            "name": "Banco Inter CDB",
            "assetType": "TESOURO_DIRETO",
            "profitability": 0.115,
            "maturityDate": "2027-06-30"
        }"#;

        let asset: Asset = serde_json::from_str(json).unwrap();

        assert_eq!(asset.id(), "a1");
        assert_eq!(*asset.asset_type(), AssetType::TesouroDireto);
        assert_eq!(*asset.profitability(), dec!(0.115));
        assert_eq!(asset.maturity_date().to_string(), "2027-06-30");
        assert_eq!(*asset.minimum_value(), None);
    }

    #[test]
    fn asset_type_wire_names_match_the_backend_enum() {
        let expected = ["CDB", "LCI", "LCA", "CRI", "CRA", "TESOURO_DIRETO"];
        for (asset_type, name) in AssetType::iter().zip(expected) {
            let json = serde_json::to_string(&asset_type).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
        }
    }

    #[test]
    fn investment_deserializes_with_and_without_withdraw_date() {
        let active = r#"{
            "id": "i1",
            "assetId": "a1",
            "initialValue": 1000.0,
            "purchaseDate": "2026-01-15"
        }"#;
        let history = r#"{
            "id": "i2",
            "assetId": "a1",
            "initialValue": 500.0,
            "purchaseDate": "2025-03-10",
            "withdrawDate": "2025-09-01"
        }"#;

        let active: Investment = serde_json::from_str(active).unwrap();
        let history: Investment = serde_json::from_str(history).unwrap();

        assert!(!active.is_history());
        assert!(history.is_history());
        assert_eq!(
            history.withdraw_date().as_ref().map(|d| d.to_string()),
            Some("2025-09-01".to_string())
        );
    }
}
