#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use flightdash::model::Flight;

pub fn flight(callsign: &str, altitude: Option<f64>, speed: Option<f64>, distance: Option<f64>) -> Flight {
    Flight {
        callsign: Some(callsign.to_string()),
        icao24: Some(format!("{}x", callsign.to_lowercase())),
        altitude_ft: altitude,
        speed_kts: speed,
        distance_to_target: distance,
        timestamp: Some("2025-07-01T12:34:56".to_string()),
        ..Flight::default()
    }
}

pub fn numbered_flights(n: usize) -> Vec<Flight> {
    (0..n)
        .map(|i| {
            flight(
                &format!("DLH{i}"),
                Some(1000.0 + i as f64),
                Some(150.0),
                Some(1.0),
            )
        })
        .collect()
}

/// Minimal HTTP/1.1 server answering each request from `route`.
/// Records the request target (path and query) of every request.
pub struct StubServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let route = Arc::new(route);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let seen = Arc::clone(&seen);
                let route = Arc::clone(&route);
                thread::spawn(move || {
                    let mut reader = BufReader::new(stream.try_clone().unwrap());
                    let mut request_line = String::new();
                    if reader.read_line(&mut request_line).is_err() {
                        return;
                    }
                    loop {
                        let mut header = String::new();
                        match reader.read_line(&mut header) {
                            Ok(0) | Err(_) => break,
                            Ok(_) if header == "\r\n" => break,
                            Ok(_) => {}
                        }
                    }

                    let target = request_line
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();
                    seen.lock().unwrap().push(target.clone());

                    let (status, body) = (*route)(&target);
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes());
                    let _ = stream.flush();
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub const STATS_JSON: &str = r#"{"total_flights":12345,"flights_today":87,"average_altitude_ft":4321.6,"average_speed_kts":180.4}"#;

pub const FLIGHTS_JSON: &str = r#"[
  {"id":1,"icao24":"3c6444","aircraft_type":"A320","altitude_ft":3500.4,"speed_kts":160.0,
   "latitude":49.95,"longitude":8.63,"distance_to_target":0.82,"timestamp":"2025-07-01 12:34:56",
   "is_departing_fra":1,"closest_point":0,"callsign":"DLH4AB","origin_airport":"FRA",
   "destination_airport":"LHR","record_type":"current"},
  {"id":2,"icao24":"4ca7b5","aircraft_type":null,"altitude_ft":null,"speed_kts":210.5,
   "latitude":49.94,"longitude":8.64,"distance_to_target":1.7,"timestamp":"2025-07-01 12:30:00",
   "is_departing_fra":0,"closest_point":1,"callsign":"","origin_airport":null,
   "destination_airport":null}
]"#;
