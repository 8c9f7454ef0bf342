mod common;

use common::*;
use libportal::portal::Error;

#[test]
fn test_connections_are_served_strictly_in_sequence() {
    let queue = vec![
        MockConnection::new(b"GET /scan.json HTTP/1.1\r\n\r\n"),
        MockConnection::new(b"GET /scan.json HTTP/1.1\r\n\r\n"),
        MockConnection::new(b"GET /scan.json HTTP/1.1\r\n\r\n"),
    ];
    let mut listener = MockListener::new(queue);
    let events = listener.events.clone();

    let wifi = MockWifi::new();
    let scans = wifi.scans.clone();
    let mut portal = portal(MockConfig::new(), wifi, MockStatus::empty());

    // The queue drains, then accept fails and the loop stops.
    let result = portal.serve_forever(&mut listener);
    assert_eq!(result, Err(Error::Accept));

    // Each connection is fully closed before the next accept happens.
    assert_eq!(
        events.borrow().as_slice(),
        [
            "accept0", "close0", "accept1", "close1", "accept2", "close2"
        ]
    );
    assert_eq!(*scans.borrow(), 3);
}

#[test]
fn test_acceptor_yields_between_connections() {
    let queue = vec![
        MockConnection::new(b"GET /scan.json HTTP/1.1\r\n\r\n"),
        MockConnection::new(b"GET /scan.json HTTP/1.1\r\n\r\n"),
    ];
    let mut listener = MockListener::new(queue);
    let yields = listener.yields.clone();
    let mut portal = portal(MockConfig::new(), MockWifi::new(), MockStatus::empty());
    let _ = portal.serve_forever(&mut listener);
    assert_eq!(*yields.borrow(), 2);
}

#[test]
fn test_accept_failure_is_fatal_and_not_retried() {
    let mut listener = MockListener::new(Vec::new());
    let mut portal = portal(MockConfig::new(), MockWifi::new(), MockStatus::empty());
    let result = portal.serve_forever(&mut listener);
    assert_eq!(result, Err(Error::Accept));
    assert!(listener.events.borrow().is_empty());
}

#[test]
fn test_aborted_connection_does_not_stop_the_loop() {
    let queue = vec![
        MockConnection::new(b"GET / HTTP/1.1\r\n\r\n").with_failing_writes(),
        MockConnection::new(b"GET /scan.json HTTP/1.1\r\n\r\n"),
    ];
    let mut listener = MockListener::new(queue);
    let events = listener.events.clone();

    let mut portal = portal(MockConfig::new(), MockWifi::new(), MockStatus::empty());
    let result = portal.serve_forever(&mut listener);
    assert_eq!(result, Err(Error::Accept));

    // The write failure abandoned connection 0, closed it, and the loop
    // went on to serve connection 1.
    assert_eq!(
        events.borrow().as_slice(),
        ["accept0", "close0", "accept1", "close1"]
    );

    let (_, wifi, _, _, _) = portal.into_parts();
    assert_eq!(*wifi.scans.borrow(), 1);
}
