//! End-to-end tests over loopback TCP

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use onvif_sim::error::TransportError;
use onvif_sim::{DeviceIdentity, DeviceState, Error, MediaProfile, OnvifServer, ServerConfig};

fn local_config() -> ServerConfig {
    ServerConfig::with_addr("127.0.0.1:0".parse().unwrap())
}

fn spawn(config: ServerConfig) -> (Arc<OnvifServer>, JoinHandle<onvif_sim::Result<()>>) {
    let server = Arc::new(OnvifServer::start(config, DeviceState::default()).unwrap());
    let runner = Arc::clone(&server);
    let handle = tokio::spawn(async move { runner.run().await });
    (server, handle)
}

fn soap_request(operation: &str, namespace: &str) -> String {
    let body = format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            "<s:Envelope xmlns:s=\"http://www.w3.org/2003/05/soap-envelope\">",
            "<s:Body><{op} xmlns=\"{ns}\"/></s:Body>",
            "</s:Envelope>"
        ),
        op = operation,
        ns = namespace,
    );
    format!(
        concat!(
            "POST /onvif/device_service HTTP/1.1\r\n",
            "Host: localhost\r\n",
            "Content-Type: application/soap+xml; charset=utf-8\r\n",
            "Content-Length: {len}\r\n",
            "\r\n",
            "{body}"
        ),
        len = body.len(),
        body = body,
    )
}

async fn exchange(addr: SocketAddr, payload: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(payload.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

fn split_response(response: &str) -> (&str, &str) {
    let pos = response.find("\r\n\r\n").expect("missing header terminator");
    (&response[..pos], &response[pos + 4..])
}

const NS_DEVICE: &str = "http://www.onvif.org/ver10/device/wsdl";
const NS_MEDIA: &str = "http://www.onvif.org/ver10/media/wsdl";
const NS_PTZ: &str = "http://www.onvif.org/ver20/ptz/wsdl";

#[tokio::test]
async fn test_device_information_over_http() {
    let (server, _handle) = spawn(local_config());

    let response = exchange(
        server.local_addr(),
        &soap_request("GetDeviceInformation", NS_DEVICE),
    )
    .await;
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 200 OK"));
    assert!(head.contains("Content-Type: application/soap+xml; charset=utf-8"));
    assert!(head.contains("Connection: close"));
    assert!(head.contains(&format!("Content-Length: {}", body.len())));

    assert!(body.contains("<tds:GetDeviceInformationResponse>"));
    assert!(body.contains("<tds:Manufacturer>Sample Manufacturer</tds:Manufacturer>"));
    assert!(body.contains("<tds:SerialNumber>123456789</tds:SerialNumber>"));

    server.stop();
}

#[tokio::test]
async fn test_advertised_urls_use_bound_port() {
    let (server, _handle) = spawn(local_config());
    let port = server.local_addr().port();
    assert_eq!(server.config().http_port(), port);

    let response = exchange(server.local_addr(), &soap_request("GetCapabilities", NS_DEVICE)).await;
    for service in ["device_service", "media_service", "ptz_service"] {
        let xaddr = format!("<tds:XAddr>http://localhost:{}/onvif/{}</tds:XAddr>", port, service);
        assert!(response.contains(&xaddr), "missing {}", xaddr);
    }

    let response = exchange(server.local_addr(), &soap_request("GetStreamUri", NS_MEDIA)).await;
    assert!(response.contains(&format!("rtsp://localhost:{}/stream1", u32::from(port) + 1)));

    server.stop();
}

#[tokio::test]
async fn test_profiles_and_ptz() {
    let (server, _handle) = spawn(local_config());

    let response = exchange(server.local_addr(), &soap_request("GetProfiles", NS_MEDIA)).await;
    assert_eq!(response.matches("<trt:Profiles ").count(), 2);
    assert!(response.find("Profile_1").unwrap() < response.find("Profile_2").unwrap());

    let response = exchange(server.local_addr(), &soap_request("GetConfigurations", NS_PTZ)).await;
    assert!(response.contains("<tptz:GetConfigurationsResponse>"));

    server.stop();
}

#[tokio::test]
async fn test_unknown_action_returns_fault() {
    let (server, _handle) = spawn(local_config());

    let response = exchange(server.local_addr(), &soap_request("SystemReboot", NS_DEVICE)).await;

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("<SOAP-ENV:Value>SOAP-ENV:Receiver</SOAP-ENV:Value>"));
    assert!(response.contains("Method not implemented"));
    assert_eq!(server.stats().faults, 1);

    server.stop();
}

#[tokio::test]
async fn test_raw_marker_request() {
    let (server, _handle) = spawn(local_config());

    let response = exchange(server.local_addr(), "GET / HTTP/1.1\r\nSOAPAction: GetSystemDateAndTime\r\n\r\n").await;

    assert!(response.contains("<tds:GetSystemDateAndTimeResponse>"));

    server.stop();
}

#[tokio::test]
async fn test_identical_requests_identical_responses() {
    let (server, _handle) = spawn(local_config());
    let request = soap_request("GetProfiles", NS_MEDIA);

    let first = exchange(server.local_addr(), &request).await;
    let second = exchange(server.local_addr(), &request).await;

    assert_eq!(first, second);

    server.stop();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let (server, _handle) = spawn(local_config());
    let addr = server.local_addr();

    let tasks: Vec<_> = (0..16)
        .map(|_| tokio::spawn(async move { exchange(addr, &soap_request("GetServices", NS_DEVICE)).await }))
        .collect();

    for task in tasks {
        let response = task.await.unwrap();
        assert_eq!(response.matches("<tds:Service>").count(), 3);
    }
    assert_eq!(server.stats().responses, 16);

    server.stop();
}

#[tokio::test]
async fn test_empty_connection_gets_no_response() {
    let (server, _handle) = spawn(local_config());

    let mut stream = TcpStream::connect(server.local_addr()).await.unwrap();
    stream.shutdown().await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    assert!(response.is_empty());

    // Other connections are unaffected
    let response = exchange(server.local_addr(), &soap_request("GetProfiles", NS_MEDIA)).await;
    assert!(response.contains("<trt:GetProfilesResponse>"));

    server.stop();
}

#[tokio::test]
async fn test_silent_client_times_out() {
    let config = local_config().connection_timeout(Duration::from_millis(100));
    let (server, _handle) = spawn(config);

    let mut stream = TcpStream::connect(server.local_addr()).await.unwrap();
    let mut response = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server did not close the idle connection");

    assert!(read.map(|n| n == 0).unwrap_or(true));
    assert_eq!(server.stats().read_failures, 1);

    server.stop();
}

#[tokio::test]
async fn test_connection_limit_queues_clients() {
    let config = local_config()
        .max_connections(1)
        .connection_timeout(Duration::from_millis(300));
    let (server, _handle) = spawn(config);

    // Holds the only slot until its read deadline
    let _idle = TcpStream::connect(server.local_addr()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        exchange(server.local_addr(), &soap_request("GetProfiles", NS_MEDIA)),
    )
    .await
    .expect("queued client was never answered");

    assert!(response.contains("<trt:GetProfilesResponse>"));
    let stats = server.stats();
    assert!(stats.throttled >= 1);
    assert_eq!(stats.read_failures, 1);
    assert_eq!(stats.responses, 1);

    server.stop();
}

#[tokio::test]
async fn test_connection_limit_burst() {
    let config = local_config().max_connections(2);
    let (server, _handle) = spawn(config);
    let addr = server.local_addr();

    let tasks: Vec<_> = (0..12)
        .map(|_| tokio::spawn(async move { exchange(addr, &soap_request("GetCapabilities", NS_DEVICE)).await }))
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().contains("<tds:GetCapabilitiesResponse>"));
    }
    assert_eq!(server.stats().responses, 12);

    server.stop();
}

#[tokio::test]
async fn test_stop_without_run_closes_socket() {
    let server = OnvifServer::start(local_config(), DeviceState::default()).unwrap();
    let addr = server.local_addr();

    server.stop();

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_inert_ptz_and_media_operations() {
    let (server, _handle) = spawn(local_config());

    for name in ["AbsoluteMove", "RelativeMove", "ContinuousMove", "Stop"] {
        let response = exchange(server.local_addr(), &soap_request(name, NS_PTZ)).await;
        assert!(response.contains(&format!("<tptz:{}Response>", name)), "{}", name);
        assert!(!response.contains("SOAP-ENV:Fault"), "{}", name);
    }

    let response = exchange(server.local_addr(), &soap_request("GetNodes", NS_PTZ)).await;
    assert!(response.contains("<tptz:GetNodesResponse>"));

    let response = exchange(server.local_addr(), &soap_request("GetStatus", NS_PTZ)).await;
    assert!(response.contains("<tptz:MoveStatus>"));

    let response = exchange(server.local_addr(), &soap_request("GetVideoSources", NS_MEDIA)).await;
    assert!(response.contains("<trt:VideoSources token=\"VideoSource_1\">"));
    assert_eq!(server.stats().faults, 0);

    server.stop();
}

#[tokio::test]
async fn test_stop_ends_run_and_closes_socket() {
    let (server, handle) = spawn(local_config());
    let addr = server.local_addr();

    server.stop();
    server.stop();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("run did not return after stop")
        .unwrap()
        .unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
    assert!(matches!(
        server.run().await,
        Err(Error::Transport(TransportError::NotListening))
    ));
}

#[tokio::test]
async fn test_run_until_shutdown_signal() {
    let server = OnvifServer::start(local_config(), DeviceState::default()).unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    tx.send(()).unwrap();
    server
        .run_until(async {
            let _ = rx.await;
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let first = OnvifServer::start(local_config(), DeviceState::default()).unwrap();

    let result = OnvifServer::start(
        ServerConfig::with_addr(first.local_addr()),
        DeviceState::default(),
    );

    assert!(matches!(
        result,
        Err(Error::Transport(TransportError::Bind { .. }))
    ));
}

#[tokio::test]
async fn test_custom_device_state_escaped() {
    let identity = DeviceIdentity::default().manufacturer("Lens & Co <EU>");
    let device = DeviceState::new(identity, vec![MediaProfile::sub_stream()]).unwrap();
    let server = Arc::new(OnvifServer::start(local_config(), device).unwrap());
    let runner = Arc::clone(&server);
    tokio::spawn(async move { runner.run().await });

    let response = exchange(
        server.local_addr(),
        &soap_request("GetDeviceInformation", NS_DEVICE),
    )
    .await;
    assert!(response.contains("<tds:Manufacturer>Lens &amp; Co &lt;EU&gt;</tds:Manufacturer>"));

    let response = exchange(server.local_addr(), &soap_request("GetProfiles", NS_MEDIA)).await;
    assert_eq!(response.matches("<trt:Profiles ").count(), 1);
    assert!(response.contains("<trt:Width>640</trt:Width>"));

    server.stop();
}
