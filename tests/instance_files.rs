use std::fs;

use tempfile::tempdir;
use wsn_lifetime::network::MAX_BATTERY;
use wsn_lifetime::network::instance::{generate_instance, load_instance, write_instance};
use wsn_lifetime::{Error, SimulationConfig};

#[test]
fn generated_instance_survives_a_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("field.txt");

    let generated = generate_instance(25, 300.0, 200.0, 7).unwrap();
    write_instance(&generated, &path).unwrap();
    let loaded = load_instance(&path).unwrap();

    assert_eq!(loaded.mote_count(), 25);
    assert_eq!(loaded.total_battery(), 25.0 * MAX_BATTERY);
    for (a, b) in generated.nodes().iter().zip(loaded.nodes()) {
        assert_eq!(a.id(), b.id());
        assert!((a.position().x - b.position().x).abs() < 1e-6);
        assert!((a.position().y - b.position().y).abs() < 1e-6);
    }
}

#[test]
fn comma_separated_instance_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("commas.txt");
    fs::write(&path, "2\n50,50\n\n10, 20\n90,80\n").unwrap();

    let network = load_instance(&path).unwrap();
    assert_eq!(network.mote_count(), 2);
    assert_eq!(network.nodes()[2].position().x, 90.0);
}

#[test]
fn missing_file_reports_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    match load_instance(&path) {
        Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn malformed_mote_line_is_located() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.txt");
    fs::write(&path, "2\n0 0\n10 10\n10 abc\n").unwrap();

    match load_instance(&path) {
        Err(Error::MalformedInstance { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected malformed instance, got {:?}", other),
    }
}

#[test]
fn config_next_to_instance_is_found() {
    let dir = tempdir().unwrap();
    let instance = dir.path().join("field.txt");
    fs::write(&instance, "0\n0 0\n").unwrap();
    fs::write(dir.path().join("config.toml"), "max-rounds = 12\nbeta = 0.25\n").unwrap();

    let config_path = SimulationConfig::config_path_from_instance(&instance);
    let config = SimulationConfig::load(&config_path).unwrap();
    assert_eq!(config.max_rounds, 12);
    assert_eq!(config.beta, 0.25);
    assert_eq!(config.head_fraction, SimulationConfig::default().head_fraction);
}
