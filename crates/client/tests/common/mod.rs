//! Common test utilities for integration tests.
//!
//! One wiremock server plays both the ticket authority and the application
//! host. The default scenario is the `acme\bob` account receiving
//! `TGT-123` and `ST-456`.
//!
//! # What this does NOT handle
//! - Application API mocks (mounted by each test)

#[allow(unused_imports)]
pub use nexus_client::testing::load_fixture;

#[allow(unused_imports)]
pub use nexus_client::{
    AppClient, AppKind, ClientError, Credential, SessionPhase, TicketAuthority,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use wiremock::matchers::{body_string, method, path, query_param};

pub const TGT: &str = "TGT-123";
pub const ST: &str = "ST-456";
pub const SESSION_COOKIE: &str = "JSESSIONID=session-abc";

/// Authority handle pointing at the mock server.
#[allow(dead_code)]
pub fn authority(server: &MockServer) -> TicketAuthority {
    TicketAuthority::new(Credential::new("acme", "bob", "secret").with_authority_host(server.uri()))
        .expect("authority builds")
}

/// Application client of `kind` whose host is the mock server.
#[allow(dead_code)]
pub fn app_client(kind: AppKind, authority: TicketAuthority, server: &MockServer) -> AppClient {
    AppClient::builder(kind, authority)
        .host(server.uri())
        .build()
        .expect("client builds")
}

/// Mount the TGT endpoint answering with `Location: .../TGT-123`.
#[allow(dead_code)]
pub async fn mount_tgt(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/cas/v1/tickets"))
        .and(body_string("username=acme%5Cbob&password=secret"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", format!("{}/cas/v1/tickets/{}", server.uri(), TGT)),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mount the ST endpoint answering with `ST-456` for any service.
#[allow(dead_code)]
pub async fn mount_st(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/cas/v1/tickets/{TGT}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(ST))
        .mount(server)
        .await;
}

/// Mount the session validation for `session_path`, setting the session cookie.
#[allow(dead_code)]
pub async fn mount_validation(server: &MockServer, session_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(session_path))
        .and(query_param("ticket", ST))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("Set-Cookie", format!("{SESSION_COOKIE}; Path=/")),
        )
        .mount(server)
        .await;
}

/// Mount the whole handshake for `kind` and return a logged-in client.
#[allow(dead_code)]
pub async fn logged_in(kind: AppKind, server: &MockServer) -> AppClient {
    mount_tgt(server, 1).await;
    mount_st(server).await;
    mount_validation(server, kind.descriptor().session_path, 200).await;

    let mut client = app_client(kind, authority(server), server);
    client.login().await.expect("login succeeds");
    client
}
