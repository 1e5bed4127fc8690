//! Drive a terminal session over real HTTP against the mock server.

use workout_cli::{Session, Transport};
use workout_core::WorkoutClient;

fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn create_two_workouts_then_reload() {
    let origin = spawn_server();
    let transport = Transport::new();

    let mut session = Session::new(WorkoutClient::new(&origin), |req| transport.execute(req));
    let mut out = Vec::new();
    session
        .run("Leg Day\n:create\nPush Day\n:create\n:quit\n".as_bytes(), &mut out)
        .unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(output.ends_with("Workouts\n- Leg Day\n- Push Day\n[] (:create)\n"));

    // A fresh session sees the same collection in the same order.
    let mut reloaded = Session::new(WorkoutClient::new(&origin), |req| transport.execute(req));
    let mut out = Vec::new();
    reloaded.run("".as_bytes(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Workouts\n- Leg Day\n- Push Day\n[] (:create)\n"
    );
}

#[test]
fn create_sends_title_verbatim() {
    let origin = spawn_server();
    let transport = Transport::new();
    let title = r#"  "Heavy" legs \ {day}  "#;

    let mut session = Session::new(WorkoutClient::new(&origin), |req| transport.execute(req));
    let input = format!("{title}\n:create\n");
    session.run(input.as_bytes(), Vec::new()).unwrap();

    let titles: Vec<&str> = session.view().rows().map(|r| r.title).collect();
    assert_eq!(titles, vec![title]);
}
