//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use nodion_dns_client::{NodionClient, Record, RecordType, Zone};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// API key the mock server accepts.
pub const SECRET: &str = "secret";

pub const ZONE_ID: &str = "52be5f1b-fee7-4a42-b668-85890c41be5b";

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 读取 `tests/fixtures` 下的 JSON 文件
pub fn fixture(name: &str) -> String {
    let file = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&file)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", file.display()))
}

/// Matches requests whose `Authorization` header is not exactly `Bearer <SECRET>`.
struct WrongBearer;

impl Match for WrongBearer {
    fn matches(&self, request: &Request) -> bool {
        let expected = format!("Bearer {SECRET}");
        request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            != Some(expected.as_str())
    }
}

/// 测试上下文 - 封装 mock server 和指向它的 client
pub struct TestContext {
    pub server: MockServer,
    pub client: NodionClient,
}

impl TestContext {
    /// Starts a mock server that rejects bad credentials with 401 and a
    /// client configured with the accepted key.
    pub async fn new() -> Self {
        Self::with_key(SECRET).await
    }

    pub async fn with_key(api_key: &str) -> Self {
        let server = MockServer::start().await;

        Mock::given(WrongBearer)
            .respond_with(|req: &Request| {
                let got = req
                    .headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                ResponseTemplate::new(401).set_body_string(format!("invalid API key: {got}\n"))
            })
            .with_priority(1)
            .mount(&server)
            .await;

        let client = NodionClient::builder(api_key)
            .base_url(server.uri())
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|e| panic!("failed to build client: {e}"));

        Self { server, client }
    }

    /// Serves `fixture_name` with `status` for `http_method` on `route`,
    /// mirroring the fixture handlers of the upstream API docs.
    pub async fn serve_fixture(
        &self,
        http_method: &str,
        route: &str,
        status: u16,
        fixture_name: &str,
    ) {
        Mock::given(method(http_method))
            .and(path(route))
            .and(header("Authorization", format!("Bearer {SECRET}").as_str()))
            .respond_with(
                ResponseTemplate::new(status).set_body_raw(fixture(fixture_name), "application/json"),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Number of requests that reached the mock server.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

/// UTC timestamp with millisecond precision.
pub fn utc(date: (i32, u32, u32), time: (u32, u32, u32), millis: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .and_then(|d| d.and_hms_milli_opt(time.0, time.1, time.2, millis))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|| panic!("invalid timestamp {date:?} {time:?}"))
}

fn fixture_record(
    id: &str,
    record_type: RecordType,
    name: &str,
    content: &str,
    zone_id: Option<&str>,
) -> Record {
    let at = utc((2023, 1, 1), (10, 0, 0), 0);
    Record {
        id: Some(id.to_string()),
        record_type,
        name: name.to_string(),
        content: content.to_string(),
        ttl: 3600,
        zone_id: zone_id.map(str::to_string),
        created_at: Some(at),
        updated_at: Some(at),
    }
}

/// The zone contained in `create-dns-zone.json` and `get-dns-zones.json`.
pub fn expected_zone() -> Zone {
    let at = utc((2023, 1, 1), (10, 0, 0), 0);
    let z = Some(ZONE_ID);
    Zone {
        id: ZONE_ID.to_string(),
        name: "nodionsample.com".to_string(),
        records: vec![
            fixture_record("5ed9465f-f8c6-432d-9474-3e9880f6adfe", RecordType::A, "@", "1.2.3.4", z),
            fixture_record("60a0647b-0b08-4dc0-8d51-4e21c799457c", RecordType::A, "*", "1.2.3.4", z),
            fixture_record("b4748041-f3b2-40f3-9217-9af016c5937f", RecordType::A, "www", "1.2.3.4", z),
            fixture_record("d13e85ce-7d04-4770-9197-19f87f35e6a8", RecordType::Ns, "@", "ns1.nodion.com", z),
            fixture_record("f5454bf7-f89b-45a4-981f-7783102fd389", RecordType::Ns, "@", "ns2.nodion.com", z),
        ],
        created_at: at,
        updated_at: at,
    }
}

/// The records contained in `get-dns-zones-records.json`.
pub fn expected_records() -> Vec<Record> {
    vec![
        fixture_record("8231bac6-39f0-4f06-bd6c-076fb9abea9e", RecordType::A, "@", "1.2.3.4", None),
        fixture_record("25adc6de-ee1e-4e94-916a-be3f4bcaa586", RecordType::A, "*", "1.2.3.4", None),
        fixture_record("843fa60c-dc30-47c4-a818-fee31118a43f", RecordType::A, "www", "1.2.3.4", None),
        fixture_record("a10acb05-c76f-4170-9e27-74bb9a6c6cdc", RecordType::Ns, "@", "ns1.nodion.com", None),
        fixture_record("924f32d4-b10f-47ef-a293-adbc7169e885", RecordType::Ns, "@", "ns2.nodion.com", None),
    ]
}
