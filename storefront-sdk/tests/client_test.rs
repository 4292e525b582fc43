//! HTTP client tests against a mocked storefront backend.

use rust_decimal_macros::dec;
use serde_json::json;
use storefront_sdk::auth::AuthContext;
use storefront_sdk::client::{
    AddressClient, BankAccountClient, CardClient, ClientError, CurrencyClient, PaymentClient,
};
use storefront_sdk::objects::{
    AddressType, ConvertCurrencyRequest, CreatePaymentRequest, Currency, InitializePaymentRequest,
    PaymentGateway, PaymentSummary, ProtectionMode, ShippingAddress,
};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).unwrap()
}

fn auth() -> AuthContext {
    AuthContext::bearer("test-token")
}

fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Jane Doe".into(),
        street1: "1 Market St".into(),
        street2: None,
        city: "San Francisco".into(),
        state: Some("CA".into()),
        zip_code: "94105".into(),
        country: "US".into(),
        phone_number: None,
        address_type: AddressType::Home,
    }
}

#[tokio::test]
async fn create_payment_sends_camel_case_body_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "productId": "prod_1",
            "paymentGateway": "stripe",
            "currency": "USD",
            "shippingAddress": {"fullName": "Jane Doe"},
            "paymentSummary": {
                "protectionMode": "escrow",
                "salesTax": 0.72,
                "total": 93.72,
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paymentId": "pay_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = PaymentClient::new(base_url(&server), auth());
    let request = CreatePaymentRequest {
        product_id: "prod_1".into(),
        offer_id: None,
        payment_gateway: PaymentGateway::Stripe,
        currency: Currency::usd(),
        shipping_address: address(),
        payment_summary: PaymentSummary {
            product_price: dec!(80),
            protection_mode: ProtectionMode::Escrow,
            protection_fee: dec!(8),
            shipping_cost: dec!(5),
            sales_tax: dec!(0.72),
            total: dec!(93.72),
        },
        card_details: None,
        bank_account_details: None,
    };

    let resp = client.create_payment(&request).await.unwrap();
    assert_eq!(resp.payment_id, "pay_1");
}

#[tokio::test]
async fn api_errors_carry_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/initialize"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Payment already initialized"})),
        )
        .mount(&server)
        .await;

    let client = PaymentClient::new(base_url(&server), auth());
    let request = InitializePaymentRequest {
        payment_id: "pay_1".into(),
        return_url: Url::parse("https://shop.example.com/payment/success").unwrap(),
        cancel_url: Url::parse("https://shop.example.com/payment/cancel").unwrap(),
    };

    let err = client.initialize_payment(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(422));
    assert_eq!(
        err.server_message().as_deref(),
        Some("Payment already initialized")
    );
}

#[tokio::test]
async fn lists_cards_and_bank_accounts_with_active_only_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cards"))
        .and(query_param("activeOnly", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cards": [{"id": "c1", "brand": "Visa", "last4": "4242"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bank-accounts"))
        .and(query_param("activeOnly", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"id": "b1", "bankName": "Chase", "accountHolderName": "Jane Doe"}]
        })))
        .mount(&server)
        .await;

    let cards = CardClient::new(base_url(&server), auth())
        .get_user_cards(true)
        .await
        .unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "c1");

    let accounts = BankAccountClient::new(base_url(&server), auth())
        .get_bank_accounts(false)
        .await
        .unwrap();
    assert_eq!(accounts[0].bank_name, "Chase");
}

#[tokio::test]
async fn missing_default_address_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/addresses/default"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No default address"})))
        .mount(&server)
        .await;

    let address = AddressClient::new(base_url(&server), auth())
        .get_default_address()
        .await
        .unwrap();
    assert!(address.is_none());
}

#[tokio::test]
async fn anonymous_requests_have_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/currency/convert"))
        .and(body_partial_json(json!({"amount": 100.0, "fromCurrency": "USD", "toCurrency": "AED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "convertedAmount": 367.25,
            "exchangeRate": 3.6725,
            "lastUpdated": "2026-10-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = CurrencyClient::new(base_url(&server), AuthContext::anonymous());
    let resp = client
        .convert_currency(&ConvertCurrencyRequest {
            amount: dec!(100),
            from_currency: Currency::usd(),
            to_currency: Currency::new("AED").unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(resp.converted_amount, dec!(367.25));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}
