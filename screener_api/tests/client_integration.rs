use screener_api::{Client, Error, ReportView};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn fetch_standalone_page_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("tolins.html");

    Mock::given(method("GET"))
        .and(path("/company/TOLINS/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client
        .fetch_company_page("TOLINS", ReportView::Standalone)
        .await;
    assert!(result.is_ok());
    assert!(result.unwrap().contains("Quarterly Results"));
}

#[tokio::test]
async fn fetch_consolidated_page_hits_consolidated_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company/AVANTEL/consolidated/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client
        .fetch_company_page("AVANTEL", ReportView::Consolidated)
        .await;
    assert_eq!(result.unwrap(), "<html></html>");
}

#[tokio::test]
async fn fetch_not_found_returns_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company/NOPE/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .fetch_company_page("NOPE", ReportView::Standalone)
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not Found");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client
        .fetch_company_page("TOLINS", ReportView::Standalone)
        .await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn fetch_connection_refused_is_request_error() {
    let mock_server = MockServer::builder().start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = Client::with_base_url(&uri).unwrap();
    let result = client
        .fetch_company_page("TOLINS", ReportView::Standalone)
        .await;
    assert!(matches!(result, Err(Error::Request(_))));
}
