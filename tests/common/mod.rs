#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use libportal::config::ConfigStore;
use libportal::network::error::Error as NetError;
use libportal::network::{Accept, Close, Connection, Read, Write};
use libportal::ota::OtaTrigger;
use libportal::portal::{Portal, PortalConfig, SharedStatus, StatusError};
use libportal::system::{Reboot, RebootMode};
use libportal::wifi::{HostName, IpString, StationConfig, WifiControl};

/// How the mock connection ends its read phase once the queued fragments
/// are drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfStream {
    /// Receive timeout, the usual idle-line case.
    Timeout,
    /// Orderly close by the peer.
    Eof,
}

/// A scripted connection: hands out queued request fragments, captures
/// everything written, and counts how often it is closed.
pub struct MockConnection {
    fragments: Vec<Vec<u8>>,
    end: EndOfStream,
    fail_writes: bool,
    written: Rc<RefCell<Vec<u8>>>,
    closes: Rc<RefCell<u32>>,
    events: Option<(usize, Rc<RefCell<Vec<String>>>)>,
}

impl MockConnection {
    pub fn new(request: &[u8]) -> Self {
        Self::fragmented(&[request])
    }

    pub fn fragmented(fragments: &[&[u8]]) -> Self {
        Self {
            fragments: fragments
                .iter()
                .filter(|f| !f.is_empty())
                .map(|f| f.to_vec())
                .collect(),
            end: EndOfStream::Timeout,
            fail_writes: false,
            written: Rc::new(RefCell::new(Vec::new())),
            closes: Rc::new(RefCell::new(0)),
            events: None,
        }
    }

    /// A connection that delivers nothing at all.
    pub fn silent() -> Self {
        Self::fragmented(&[])
    }

    pub fn with_end(mut self, end: EndOfStream) -> Self {
        self.end = end;
        self
    }

    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Tag the connection with an id and a shared event log; `close`
    /// records `close<id>` so tests can assert scheduling order.
    pub fn with_events(mut self, id: usize, events: Rc<RefCell<Vec<String>>>) -> Self {
        self.events = Some((id, events));
        self
    }

    /// Shared handle to the captured output, valid after close.
    pub fn output(&self) -> Rc<RefCell<Vec<u8>>> {
        self.written.clone()
    }

    /// Shared handle to the close counter.
    pub fn close_count(&self) -> Rc<RefCell<u32>> {
        self.closes.clone()
    }
}

impl Read for MockConnection {
    type Error = NetError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fragments.is_empty() {
            return match self.end {
                EndOfStream::Timeout => Err(NetError::Timeout),
                EndOfStream::Eof => Ok(0),
            };
        }
        let frag = &mut self.fragments[0];
        let len = buf.len().min(frag.len());
        buf[..len].copy_from_slice(&frag[..len]);
        frag.drain(..len);
        if frag.is_empty() {
            self.fragments.remove(0);
        }
        Ok(len)
    }
}

impl Write for MockConnection {
    type Error = NetError;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(NetError::WriteError);
        }
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = NetError;

    fn close(self) -> Result<(), Self::Error> {
        *self.closes.borrow_mut() += 1;
        if let Some((id, events)) = &self.events {
            events.borrow_mut().push(format!("close{}", id));
        }
        Ok(())
    }
}

impl Connection for MockConnection {}

/// A listener over a queue of scripted connections. Once the queue is
/// drained, `accept` fails, which stops the serving loop.
pub struct MockListener {
    queue: Vec<MockConnection>,
    accepted: usize,
    pub events: Rc<RefCell<Vec<String>>>,
    pub yields: Rc<RefCell<u32>>,
}

impl MockListener {
    pub fn new(queue: Vec<MockConnection>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let queue = queue
            .into_iter()
            .enumerate()
            .map(|(id, conn)| conn.with_events(id, events.clone()))
            .collect();
        Self {
            queue,
            accepted: 0,
            events,
            yields: Rc::new(RefCell::new(0)),
        }
    }
}

impl Accept for MockListener {
    type Connection = MockConnection;
    type Error = NetError;

    fn accept(&mut self) -> Result<MockConnection, Self::Error> {
        if self.queue.is_empty() {
            return Err(NetError::AcceptError);
        }
        self.events
            .borrow_mut()
            .push(format!("accept{}", self.accepted));
        self.accepted += 1;
        Ok(self.queue.remove(0))
    }

    fn yield_now(&mut self) {
        *self.yields.borrow_mut() += 1;
    }
}

/// In-memory configuration store with switchable failure modes.
pub struct MockConfig {
    pub map: Rc<RefCell<BTreeMap<String, String>>>,
    pub fail_get: bool,
    pub fail_set: bool,
    pub fail_json: bool,
}

impl MockConfig {
    pub fn new() -> Self {
        Self {
            map: Rc::new(RefCell::new(BTreeMap::new())),
            fail_get: false,
            fail_set: false,
            fail_json: false,
        }
    }
}

impl ConfigStore for MockConfig {
    type Error = libportal::config::error::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        if self.fail_get {
            return Err(libportal::config::error::Error::ReadError);
        }
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.fail_set {
            return Err(libportal::config::error::Error::WriteError);
        }
        self.map.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }

    fn to_json(&self) -> Result<String, Self::Error> {
        if self.fail_json {
            return Err(libportal::config::error::Error::RenderError);
        }
        let map = self.map.borrow();
        let fields: Vec<String> = map
            .iter()
            .map(|(k, v)| format!("\"{}\":\"{}\"", k, v))
            .collect();
        Ok(format!("{{{}}}", fields.join(",")))
    }
}

/// Wi-Fi control mock counting every request it receives.
pub struct MockWifi {
    pub scans: Rc<RefCell<u32>>,
    pub connects: Rc<RefCell<Vec<StationConfig>>>,
    pub disconnects: Rc<RefCell<u32>>,
    pub sta_ip: &'static str,
    pub hostname: Option<&'static str>,
}

impl MockWifi {
    pub fn new() -> Self {
        Self {
            scans: Rc::new(RefCell::new(0)),
            connects: Rc::new(RefCell::new(Vec::new())),
            disconnects: Rc::new(RefCell::new(0)),
            sta_ip: "0.0.0.0",
            hostname: None,
        }
    }
}

impl WifiControl for MockWifi {
    type Error = core::convert::Infallible;

    fn scan_async(&mut self) -> Result<(), Self::Error> {
        *self.scans.borrow_mut() += 1;
        Ok(())
    }

    fn connect_async(&mut self, config: &StationConfig) -> Result<(), Self::Error> {
        self.connects.borrow_mut().push(config.clone());
        Ok(())
    }

    fn disconnect_async(&mut self) -> Result<(), Self::Error> {
        *self.disconnects.borrow_mut() += 1;
        Ok(())
    }

    fn sta_ip(&self) -> IpString {
        IpString::try_from(self.sta_ip).unwrap()
    }

    fn hostname(&self) -> Option<HostName> {
        self.hostname.map(|name| HostName::try_from(name).unwrap())
    }
}

/// Status slot mock with fixed snapshots and a switchable busy lock.
pub struct MockStatus {
    pub ap_json: Option<&'static str>,
    pub ip_json: Option<&'static str>,
    pub busy: bool,
}

impl MockStatus {
    pub fn empty() -> Self {
        Self {
            ap_json: None,
            ip_json: None,
            busy: false,
        }
    }

    pub fn with_snapshots(ap_json: &'static str, ip_json: &'static str) -> Self {
        Self {
            ap_json: Some(ap_json),
            ip_json: Some(ip_json),
            busy: false,
        }
    }

    pub fn busy() -> Self {
        Self {
            ap_json: None,
            ip_json: None,
            busy: true,
        }
    }
}

impl SharedStatus for MockStatus {
    fn ap_list_json(&self) -> Result<String, StatusError> {
        if self.busy {
            return Err(StatusError::Busy);
        }
        self.ap_json.map(String::from).ok_or(StatusError::Empty)
    }

    fn ip_info_json(&self) -> Result<String, StatusError> {
        if self.busy {
            return Err(StatusError::Busy);
        }
        self.ip_json.map(String::from).ok_or(StatusError::Empty)
    }
}

/// Reboot controller mock recording requested modes.
pub struct MockReboot {
    pub modes: Rc<RefCell<Vec<RebootMode>>>,
}

impl MockReboot {
    pub fn new() -> Self {
        Self {
            modes: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Reboot for MockReboot {
    fn reboot(&mut self, mode: RebootMode) {
        self.modes.borrow_mut().push(mode);
    }
}

/// OTA trigger mock recording submitted URLs.
pub struct MockOta {
    pub urls: Rc<RefCell<Vec<String>>>,
}

impl MockOta {
    pub fn new() -> Self {
        Self {
            urls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl OtaTrigger for MockOta {
    fn start(&mut self, url: &str) {
        self.urls.borrow_mut().push(url.into());
    }
}

pub type TestPortal = Portal<MockConfig, MockWifi, MockStatus, MockReboot, MockOta>;

/// Portal over fresh mocks; grab shared handles off the mocks before
/// passing them in.
pub fn portal(config: MockConfig, wifi: MockWifi, status: MockStatus) -> TestPortal {
    Portal::new(
        PortalConfig::default(),
        config,
        wifi,
        status,
        MockReboot::new(),
        MockOta::new(),
    )
}

/// Serve one scripted request and return everything written to the socket.
pub fn run_request(portal: &mut TestPortal, request: &[u8]) -> Vec<u8> {
    let conn = MockConnection::new(request);
    let output = conn.output();
    portal
        .serve_connection(conn)
        .expect("connection should be served cleanly");
    let bytes = output.borrow().clone();
    bytes
}

/// Split a captured response into (head, body) at the blank line.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let pos = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    (
        String::from_utf8(raw[..pos + 4].to_vec()).expect("response head is not UTF-8"),
        raw[pos + 4..].to_vec(),
    )
}
