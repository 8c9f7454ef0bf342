//! Server context and per-connection pipeline.

use alloc::string::String;

use super::buffer::{RecvBuffer, read_request};
use super::error::Error;
use super::policy;
use super::request::Request;
use super::response;
use super::routes::{self, Action};
use super::status::SharedStatus;
use crate::config::{AP_IP_KEY, ConfigStore, HOST_NAME_KEY};
use crate::network::{Accept, Close, Connection};
use crate::ota::OtaTrigger;
use crate::system::Reboot;
use crate::wifi::{IpString, StationConfig, WifiControl};

/// Access-point IP used when the configuration store has no override.
pub const DEFAULT_AP_IP: &str = "192.168.4.1";

/// Reserved field name that triggers a firmware update instead of being
/// persisted.
const OTA_URL_FIELD: &str = "fwurl";

/// Tunables of the server context.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Access-point IP to fall back on when the store has no
    /// [`AP_IP_KEY`] entry.
    pub ap_ip_fallback: IpString,
}

impl Default for PortalConfig {
    fn default() -> Self {
        let mut ip = IpString::new();
        // DEFAULT_AP_IP always fits a dotted-decimal string.
        let _ = ip.push_str(DEFAULT_AP_IP);
        Self { ap_ip_fallback: ip }
    }
}

/// The captive-portal server context.
///
/// Owns the collaborator set and the serving lifecycle; there are no
/// ambient globals. Construct one at service start, run
/// [`serve_forever`](Portal::serve_forever) on the acceptor task, and drop
/// it at service stop.
pub struct Portal<K, W, S, R, O>
where
    K: ConfigStore,
    W: WifiControl,
    S: SharedStatus,
    R: Reboot,
    O: OtaTrigger,
{
    settings: PortalConfig,
    config: K,
    wifi: W,
    status: S,
    reboot: R,
    ota: O,
}

impl<K, W, S, R, O> Portal<K, W, S, R, O>
where
    K: ConfigStore,
    W: WifiControl,
    S: SharedStatus,
    R: Reboot,
    O: OtaTrigger,
{
    /// Assemble a server context from its collaborators.
    pub fn new(settings: PortalConfig, config: K, wifi: W, status: S, reboot: R, ota: O) -> Self {
        Self {
            settings,
            config,
            wifi,
            status,
            reboot,
            ota,
        }
    }

    /// Tear the context apart, handing the collaborators back.
    pub fn into_parts(self) -> (K, W, S, R, O) {
        (self.config, self.wifi, self.status, self.reboot, self.ota)
    }

    /// Accept and serve connections until the listener fails.
    ///
    /// Connections are processed strictly one at a time: the next accept
    /// happens only after the previous socket is closed. Per-connection
    /// failures are logged and absorbed. A failed accept is fatal: the
    /// loop returns [`Error::Accept`] and a supervisor is expected to
    /// restart the service; nothing is retried here.
    pub fn serve_forever<L: Accept>(&mut self, listener: &mut L) -> Result<(), Error> {
        log::info!("portal serving");
        loop {
            match listener.accept() {
                Ok(conn) => {
                    if let Err(e) = self.serve_connection(conn) {
                        log::warn!("connection aborted: {:?}", e);
                    }
                }
                Err(e) => {
                    log::error!("accept failed, stopping portal: {:?}", e);
                    return Err(Error::Accept);
                }
            }
            listener.yield_now();
        }
    }

    /// Serve a single accepted connection to completion.
    ///
    /// The socket is closed on every exit path; the receive buffer and any
    /// captured values are dropped with the call frame.
    pub fn serve_connection<C: Connection>(&mut self, mut conn: C) -> Result<(), Error> {
        if let Some(peer) = conn.peer_addr() {
            log::debug!("serving connection from {}", peer);
        }
        let result = self.handle(&mut conn);
        if let Err(e) = conn.close() {
            log::debug!("close failed: {:?}", e);
        }
        result
    }

    fn handle<C: Connection>(&mut self, conn: &mut C) -> Result<(), Error> {
        let ap_ip = match self.ap_ip() {
            Ok(ip) => ip,
            Err(e) => {
                log::error!("could not read access-point address: {:?}", e);
                return response::write_all(conn, response::HDR_503);
            }
        };

        let mut buf = RecvBuffer::new();
        if let Err(e) = read_request(conn, &mut buf) {
            log::error!("receive failed: {:?}", e);
            return response::write_all(conn, response::HDR_503);
        }
        if buf.is_empty() {
            log::debug!("connection closed without a request");
            return Ok(());
        }

        let Some(req) = Request::parse(buf.as_bytes()) else {
            log::warn!("no request line in {} received bytes", buf.len());
            return response::write_all(conn, response::HDR_404);
        };
        log::debug!("request line: {} {} {}", req.method, req.path, req.version);

        let host = req.header("Host: ").unwrap_or("");
        let sta_ip = self.wifi.sta_ip();
        let hostname = self.wifi.hostname();
        if policy::should_redirect(host, &ap_ip, &sta_ip, hostname.as_deref()) {
            log::info!("redirecting host [{}] to {}", host, ap_ip);
            return response::send_redirect(conn, &ap_ip);
        }

        if req.version.is_empty() {
            log::warn!("malformed request line");
            return response::write_all(conn, response::HDR_400);
        }
        match routes::match_route(req.method, req.path) {
            Some(route) => self.dispatch(conn, &req, &route.action),
            None => {
                log::warn!("bad request: {} {}", req.method, req.path);
                response::write_all(conn, response::HDR_400)
            }
        }
    }

    fn dispatch<C: Connection>(
        &mut self,
        conn: &mut C,
        req: &Request<'_>,
        action: &Action,
    ) -> Result<(), Error> {
        match *action {
            Action::Asset(asset) => response::send_plain_asset(conn, asset),
            Action::CompressedAsset(asset) => response::send_compressed_asset(conn, asset),
            Action::TriggerScan => {
                log::info!("starting wifi scan");
                if let Err(e) = self.wifi.scan_async() {
                    log::error!("scan request failed: {:?}", e);
                }
                Ok(())
            }
            Action::ApList => {
                let result = match self.status.ap_list_json() {
                    Ok(json) => response::send_json(conn, &json),
                    Err(e) => {
                        log::error!("ap list unavailable: {:?}", e);
                        response::write_all(conn, response::HDR_503)
                    }
                };
                // Exactly one scan per request, served or not.
                log::info!("starting wifi scan");
                if let Err(e) = self.wifi.scan_async() {
                    log::error!("scan request failed: {:?}", e);
                }
                result
            }
            Action::ConfigGet => match self.config.to_json() {
                Ok(json) => response::send_json(conn, &json),
                Err(e) => {
                    log::error!("could not render configuration: {:?}", e);
                    response::write_all(conn, response::HDR_503)
                }
            },
            Action::ConfigSet => self.store_config(conn, req),
            Action::Connect => self.connect_station(conn, req),
            Action::Disconnect => {
                log::info!("forgetting stored network");
                if let Err(e) = self.wifi.disconnect_async() {
                    log::error!("disconnect request failed: {:?}", e);
                }
                response::write_all(conn, response::HDR_JSON)
            }
            Action::RebootDevice(mode) => {
                response::write_all(conn, response::HDR_JSON)?;
                log::warn!("rebooting into {:?} mode", mode);
                self.reboot.reboot(mode);
                Ok(())
            }
            Action::Status => match self.status.ip_info_json() {
                Ok(json) => response::send_json(conn, &json),
                Err(e) => {
                    log::error!("status unavailable: {:?}", e);
                    response::write_all(conn, response::HDR_503)
                }
            },
        }
    }

    /// `POST /config.json`: persist every submitted field except the
    /// reserved `fwurl`, which is captured and fired as an OTA trigger
    /// after the response is on the wire.
    fn store_config<C: Connection>(
        &mut self,
        conn: &mut C,
        req: &Request<'_>,
    ) -> Result<(), Error> {
        let mut ota_url: Option<String> = None;
        for field in req.custom_fields() {
            log::info!("config {}={}", field.name, field.value);
            if field.name == OTA_URL_FIELD {
                ota_url = Some(String::from(field.value));
            } else if let Err(e) = self.config.set(field.name, field.value) {
                // A failed write loses one field, not the request.
                log::error!("unable to save config value: {:?}", e);
            }
        }
        response::write_all(conn, response::HDR_JSON)?;
        if let Some(url) = ota_url {
            log::warn!("starting firmware update from {}", url);
            self.ota.start(&url);
        }
        Ok(())
    }

    /// `POST /connect.json`: persist an optional host name, validate the
    /// credentials and hand them to the Wi-Fi task.
    fn connect_station<C: Connection>(
        &mut self,
        conn: &mut C,
        req: &Request<'_>,
    ) -> Result<(), Error> {
        if let Some(name) = req.header("X-Custom-host_name: ") {
            if !name.is_empty() {
                if let Err(e) = self.config.set(HOST_NAME_KEY, name) {
                    log::error!("unable to save host name: {:?}", e);
                }
            }
        }

        let ssid = req.header("X-Custom-ssid: ");
        let pwd = req.header("X-Custom-pwd: ");
        let station = match (ssid, pwd) {
            (Some(ssid), Some(pwd)) => StationConfig::new(ssid, pwd).ok(),
            _ => None,
        };
        match station {
            Some(station) => {
                log::info!("connecting to [{}]", station.ssid);
                if let Err(e) = self.wifi.connect_async(&station) {
                    log::error!("connect request failed: {:?}", e);
                }
                response::write_all(conn, response::HDR_JSON)
            }
            None => {
                log::error!("ssid or password missing or over length");
                response::write_all(conn, response::HDR_400)
            }
        }
    }

    fn ap_ip(&self) -> Result<IpString, K::Error> {
        match self.config.get(AP_IP_KEY)? {
            Some(value) => match IpString::try_from(value.as_str()) {
                Ok(ip) => Ok(ip),
                Err(_) => {
                    log::warn!("configured access-point address is malformed, using default");
                    Ok(self.settings.ap_ip_fallback.clone())
                }
            },
            None => Ok(self.settings.ap_ip_fallback.clone()),
        }
    }
}
