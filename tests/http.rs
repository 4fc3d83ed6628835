use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct FoodItem {
    id: i64,
    name: String,
    kcal: f64,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    name: String,
    kcal: f64,
}

#[derive(Debug, Deserialize)]
struct DailyLogEntry {
    date: String,
    total: f64,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    items: Vec<FoodItem>,
    goal: Option<f64>,
    total: f64,
    remaining: Option<f64>,
    history: Vec<HistoryEntry>,
    daily_logs: Vec<DailyLogEntry>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

fn unique_data_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("calorie_log_http_{}_{}.json", std::process::id(), nanos()));
    path.to_string_lossy().to_string()
}

fn unique_food(base: &str) -> String {
    format!("{base}-{}", nanos())
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_calorie_log"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn snapshot(client: &Client, server: &TestServer) -> Snapshot {
    client
        .get(format!("{}/api/state", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn reset(client: &Client, server: &TestServer, confirm: bool) -> Snapshot {
    client
        .post(format!("{}/api/reset", server.base_url))
        .json(&serde_json::json!({ "confirm": confirm }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn add(client: &Client, server: &TestServer, name: &str, kcal: f64) -> reqwest::Response {
    client
        .post(format!("{}/api/items", server.base_url))
        .json(&serde_json::json!({ "name": name, "kcal": kcal }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_goal_and_repeated_food() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server, true).await;

    let response = client
        .post(format!("{}/api/goal", server.base_url))
        .json(&serde_json::json!({ "goal": "2000" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let oatmeal = unique_food("Oatmeal");
    assert!(add(&client, &server, &oatmeal, 300.0).await.status().is_success());
    assert!(add(&client, &server, &oatmeal.to_uppercase(), 300.0).await.status().is_success());

    let state = snapshot(&client, &server).await;
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.total, 600.0);
    assert_eq!(state.goal, Some(2000.0));
    assert_eq!(state.remaining, Some(1400.0));
    assert_ne!(state.items[0].id, state.items[1].id);

    let matching: Vec<&HistoryEntry> = state
        .history
        .iter()
        .filter(|entry| entry.name.eq_ignore_ascii_case(&oatmeal))
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, oatmeal);
    assert_eq!(matching[0].kcal, 300.0);

    let again = client
        .post(format!("{}/api/goal", server.base_url))
        .json(&serde_json::json!({ "goal": 1500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_invalid_item_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server, true).await;
    let before = snapshot(&client, &server).await;

    let blank_name = add(&client, &server, "", 100.0).await;
    assert_eq!(blank_name.status(), StatusCode::BAD_REQUEST);

    let bad_kcal = client
        .post(format!("{}/api/items", server.base_url))
        .json(&serde_json::json!({ "name": unique_food("Mystery"), "kcal": "lots" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_kcal.status(), StatusCode::BAD_REQUEST);

    let after = snapshot(&client, &server).await;
    assert!(after.items.is_empty());
    assert_eq!(after.total, 0.0);
    assert_eq!(after.history.len(), before.history.len());
}

#[tokio::test]
async fn http_reset_archives_session() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server, true).await;

    let pizza = unique_food("Pizza");
    add(&client, &server, &pizza, 500.0).await;
    let before = snapshot(&client, &server).await;

    let declined = reset(&client, &server, false).await;
    assert_eq!(declined.items.len(), 1);
    assert_eq!(declined.daily_logs.len(), before.daily_logs.len());

    let cleared = reset(&client, &server, true).await;
    assert!(cleared.items.is_empty());
    assert_eq!(cleared.goal, None);
    assert_eq!(cleared.daily_logs.len(), before.daily_logs.len() + 1);
    let archived = cleared.daily_logs.last().unwrap();
    assert_eq!(archived.total, 500.0);
    assert!(archived.date.contains(", "));
    assert!(cleared.history.iter().any(|entry| entry.name == pizza));

    let empty = reset(&client, &server, true).await;
    assert_eq!(empty.daily_logs.len(), cleared.daily_logs.len());

    let last = empty.daily_logs.len() - 1;
    let response = client
        .delete(format!("{}/api/logs/{last}", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        snapshot(&client, &server).await.daily_logs.len(),
        before.daily_logs.len()
    );
}

#[tokio::test]
async fn http_quick_add_and_delete_history() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server, true).await;

    let banana = unique_food("Banana");
    add(&client, &server, &banana, 105.0).await;
    let state = snapshot(&client, &server).await;
    let index = state
        .history
        .iter()
        .position(|entry| entry.name == banana)
        .unwrap();

    let added: Snapshot = client
        .post(format!("{}/api/history/{index}/add", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(added.items.len(), 2);
    assert_eq!(added.items[1].name, banana);
    assert_eq!(added.items[1].kcal, 105.0);
    assert_eq!(added.history.len(), state.history.len());

    let removed: Snapshot = client
        .delete(format!("{}/api/history/{index}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!removed.history.iter().any(|entry| entry.name == banana));
    assert_eq!(removed.items.len(), 2);

    let missing = client
        .delete(format!("{}/api/history/{}", server.base_url, removed.history.len()))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_form_delete_requires_activation() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server, true).await;

    let soup = unique_food("Soup");
    let page = client
        .post(format!("{}/items", server.base_url))
        .form(&[("name", soup.as_str()), ("kcal", "250")])
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    assert!(page.text().await.unwrap().contains(&soup));

    let id = snapshot(&client, &server).await.items[0].id;

    client
        .post(format!("{}/items/{id}/delete", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(snapshot(&client, &server).await.items.len(), 1);

    client
        .post(format!("{}/items/{id}/activate", server.base_url))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/items/{id}/delete", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(snapshot(&client, &server).await.items.is_empty());

    let unknown = client
        .delete(format!("{}/api/items/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}
