//! Runs the captive portal on a plain TCP socket.
//!
//! All collaborators are in-memory stand-ins: submitted settings land in a
//! map, Wi-Fi requests are answered with canned snapshots, and reboot/OTA
//! requests are only logged. Point a browser at the printed address to walk
//! through the setup pages.

use std::collections::BTreeMap;
use std::io::{Read as IoRead, Write as IoWrite};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use core::fmt::Write as FmtWrite;

use libportal::config::ConfigStore;
use libportal::network::error::Error as NetError;
use libportal::network::{Accept, AddrString, Close, Connection, Read, Write};
use libportal::ota::OtaTrigger;
use libportal::portal::{MutexStatus, Portal, PortalConfig};
use libportal::system::{Reboot, RebootMode};
use libportal::wifi::{
    AccessPoint, HostName, IpInfo, IpString, StationConfig, WifiControl, render_access_points,
    render_ip_info,
};

const RECV_TIMEOUT: Duration = Duration::from_millis(50);

struct NetConnection {
    stream: TcpStream,
}

impl Read for NetConnection {
    type Error = NetError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| {
            if matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ) {
                NetError::Timeout
            } else {
                NetError::ReadError
            }
        })
    }
}

impl Write for NetConnection {
    type Error = NetError;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|_| NetError::WriteError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| NetError::WriteError)
    }
}

impl Close for NetConnection {
    type Error = NetError;

    fn close(self) -> Result<(), Self::Error> {
        let _ = self.stream.shutdown(Shutdown::Both);
        Ok(())
    }
}

impl Connection for NetConnection {
    fn peer_addr(&self) -> Option<AddrString> {
        let addr = self.stream.peer_addr().ok()?;
        let mut s = AddrString::new();
        write!(s, "{}", addr).ok()?;
        Some(s)
    }
}

struct NetListener {
    listener: TcpListener,
}

impl Accept for NetListener {
    type Connection = NetConnection;
    type Error = NetError;

    fn accept(&mut self) -> Result<NetConnection, Self::Error> {
        let (stream, _) = self.listener.accept().map_err(|_| NetError::AcceptError)?;
        stream
            .set_read_timeout(Some(RECV_TIMEOUT))
            .map_err(|_| NetError::AcceptError)?;
        Ok(NetConnection { stream })
    }

    fn yield_now(&mut self) {
        std::thread::yield_now();
    }
}

#[derive(Default)]
struct DemoConfig {
    map: BTreeMap<String, String>,
}

impl ConfigStore for DemoConfig {
    type Error = core::convert::Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.map.insert(key.into(), value.into());
        Ok(())
    }

    fn to_json(&self) -> Result<String, Self::Error> {
        let fields: Vec<String> = self
            .map
            .iter()
            .map(|(k, v)| format!("\"{}\":\"{}\"", k, v))
            .collect();
        Ok(format!("{{{}}}", fields.join(",")))
    }
}

/// Stands in for the Wi-Fi manager task: answers scan and connect requests
/// by publishing fresh snapshots right away.
struct DemoWifi {
    status: Arc<MutexStatus>,
    connected: Option<String>,
}

impl DemoWifi {
    fn publish_ap_list(&self) {
        let aps = [
            AccessPoint {
                ssid: "demo-net",
                chan: 6,
                rssi: -58,
                auth: 3,
            },
            AccessPoint {
                ssid: "coffee-shop",
                chan: 11,
                rssi: -74,
                auth: 0,
            },
        ];
        let mut buf = [0u8; 512];
        if let Ok(len) = render_access_points(&aps, &mut buf) {
            if let Ok(json) = core::str::from_utf8(&buf[..len]) {
                self.status.set_ap_list(json);
            }
        }
    }

    fn publish_ip_info(&self) {
        let ssid = self.connected.as_deref().unwrap_or("");
        let info = IpInfo {
            ssid,
            ip: if self.connected.is_some() {
                "10.0.0.7"
            } else {
                "0.0.0.0"
            },
            netmask: "255.255.255.0",
            gw: "10.0.0.1",
            urc: 0,
        };
        let mut buf = [0u8; 256];
        if let Ok(len) = render_ip_info(&info, &mut buf) {
            if let Ok(json) = core::str::from_utf8(&buf[..len]) {
                self.status.set_ip_info(json);
            }
        }
    }
}

impl WifiControl for DemoWifi {
    type Error = core::convert::Infallible;

    fn scan_async(&mut self) -> Result<(), Self::Error> {
        log::info!("demo wifi: scan requested");
        self.publish_ap_list();
        Ok(())
    }

    fn connect_async(&mut self, config: &StationConfig) -> Result<(), Self::Error> {
        log::info!("demo wifi: connecting to [{}]", config.ssid);
        self.connected = Some(config.ssid.as_str().into());
        self.publish_ip_info();
        Ok(())
    }

    fn disconnect_async(&mut self) -> Result<(), Self::Error> {
        log::info!("demo wifi: disconnect requested");
        self.connected = None;
        self.publish_ip_info();
        Ok(())
    }

    fn sta_ip(&self) -> IpString {
        let ip = if self.connected.is_some() {
            "10.0.0.7"
        } else {
            "0.0.0.0"
        };
        IpString::try_from(ip).unwrap_or_default()
    }

    fn hostname(&self) -> Option<HostName> {
        HostName::try_from("libportal-demo").ok()
    }
}

struct DemoReboot;

impl Reboot for DemoReboot {
    fn reboot(&mut self, mode: RebootMode) {
        log::warn!("demo reboot: {:?} (ignored on the host)", mode);
    }
}

struct DemoOta;

impl OtaTrigger for DemoOta {
    fn start(&mut self, url: &str) {
        log::warn!("demo ota: would download {}", url);
    }
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        eprintln!("[{:<5}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Debug);

    let status = Arc::new(MutexStatus::new());
    let wifi = DemoWifi {
        status: status.clone(),
        connected: None,
    };
    wifi.publish_ap_list();
    wifi.publish_ip_info();

    let listener = TcpListener::bind("127.0.0.1:8080").expect("could not bind 127.0.0.1:8080");
    log::info!("portal at http://127.0.0.1:8080/");

    // Loopback is this host's "access point": keeps the captive redirect
    // from bouncing the browser to 192.168.4.1.
    let mut config = DemoConfig::default();
    let _ = config.set("ap_ip_address", "127.0.0.1");

    let mut portal = Portal::new(
        PortalConfig::default(),
        config,
        wifi,
        status,
        DemoReboot,
        DemoOta,
    );
    let mut listener = NetListener { listener };
    if let Err(e) = portal.serve_forever(&mut listener) {
        log::error!("portal stopped: {:?}", e);
    }
}
