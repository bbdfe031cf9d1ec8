//! Cross-module behaviour of hosts, vectors and scenarios

use nasim_core::{
    Action, Address, Host, HostError, ObservationMask, Scenario, ScenarioConfig, StatusChange,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn ssh_host() -> Host {
    Host::builder(Address::new(1, 0))
        .service("ssh", true)
        .service("ftp", false)
        .os("linux", true)
        .value(10.0)
        .build()
        .unwrap()
}

#[test]
fn exploit_sequence_from_reference_host() {
    let mut host = ssh_host();
    let target = host.address();

    let obs = host.perform_action(&Action::exploit(target, "ssh", None)).unwrap();
    assert!(obs.success);
    assert_eq!(obs.value, 10.0);
    assert!(host.compromised());

    let obs = host.perform_action(&Action::exploit(target, "ssh", None)).unwrap();
    assert!(obs.success);
    assert_eq!(obs.value, 0.0);

    let obs = host.perform_action(&Action::exploit(target, "ftp", None)).unwrap();
    assert!(!obs.success);
    assert_eq!(obs.value, 0.0);
    assert!(host.compromised());

    let obs = host
        .perform_action(&Action::exploit(target, "ssh", Some("windows")))
        .unwrap();
    assert!(!obs.success);
    assert_eq!(obs.value, 0.0);
}

#[test]
fn vector_tracks_random_status_changes() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut host = ssh_host();

    for _ in 0..500 {
        let flag = rng.gen::<bool>();
        let change = match rng.gen_range(0..3) {
            0 => StatusChange::Compromised(flag),
            1 => StatusChange::Reachable(flag),
            _ => StatusChange::Discovered(flag),
        };
        host.apply(change);

        let readable = host.get_readable(host.numpy()).unwrap();
        assert_eq!(readable.compromised, host.compromised());
        assert_eq!(readable.reachable, host.reachable());
        assert_eq!(readable.discovered, host.discovered());
    }
}

#[test]
fn rebuilt_vector_matches_incremental_one() {
    let mut host = ssh_host();
    host.set_reachable(true);
    host.perform_action(&Action::exploit(host.address(), "ssh", None))
        .unwrap();
    let incremental = host.numpy().to_vec();

    host.update_vector();
    assert_eq!(host.numpy(), incremental.as_slice());
}

#[test]
fn masked_services_never_leak() {
    let host = Host::builder(Address::new(1, 0))
        .service("ssh", true)
        .service("http", true)
        .service("ftp", false)
        .os("linux", true)
        .build()
        .unwrap();

    let hidden = ObservationMask {
        compromised: true,
        reachable: true,
        discovered: true,
        value: true,
        services: false,
        os: true,
    };
    let readable = host.get_readable(&host.observe(hidden)).unwrap();
    assert!(readable.services.values().all(|active| !active));
    assert_eq!(&readable.os, host.os());

    let shown = ObservationMask {
        services: true,
        ..ObservationMask::none()
    };
    let readable = host.get_readable(&host.observe(shown)).unwrap();
    assert_eq!(&readable.services, host.services());
    assert!(readable.os.values().all(|active| !active));
}

#[test]
fn scans_are_pure() {
    let mut host = ssh_host();
    host.set_discovered(true);
    let status = host.status();
    let vector = host.numpy().to_vec();

    for i in 0..10 {
        let action = if i % 2 == 0 {
            Action::service_scan(host.address())
        } else {
            Action::os_scan(host.address())
        };
        let obs = host.perform_action(&action).unwrap();
        assert!(obs.success);
        assert_eq!(obs.value, 0.0);
    }

    assert_eq!(host.status(), status);
    assert_eq!(host.numpy(), vector.as_slice());
}

#[test]
fn clones_are_independent() {
    let original = ssh_host();
    let mut episode = original.clone();

    episode
        .perform_action(&Action::exploit(episode.address(), "ssh", None))
        .unwrap();

    assert!(episode.compromised());
    assert!(!original.compromised());
    assert_ne!(episode.numpy(), original.numpy());
    assert_eq!(episode, original);
}

#[test]
fn bundled_scenario_replays() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../scenarios/tiny.json");
    let mut scenario = Scenario::load(path).unwrap();
    assert_eq!(scenario.len(), 3);

    let actions_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../scenarios/tiny_actions.json");
    let text = std::fs::read_to_string(actions_path).unwrap();
    let actions: Vec<Action> = serde_json::from_str(&text).unwrap();

    let total: f64 = actions
        .iter()
        .map(|a| scenario.perform_action(a).unwrap().value)
        .sum();
    // (2, 0) and (3, 0) each pay 10 once; (1, 0) is worth nothing
    assert_eq!(total, 20.0);
}

#[test]
fn unknown_target_is_reported() {
    let config = ScenarioConfig::from_json(r#"{ "services": ["ssh"], "hosts": [] }"#).unwrap();
    let mut scenario = Scenario::from_config(&config).unwrap();
    assert!(scenario.is_empty());

    let err = scenario
        .perform_action(&Action::service_scan(Address::new(1, 0)))
        .unwrap_err();
    assert!(matches!(err, HostError::HostNotFound(_)));
}
