//! End-to-end decoding scenarios through the public API

use jsonkp_decode::{
    decode, decode_collection, CoercionReason, DecodeError, Decoder, FromMapping,
    InvalidItemPolicy, JsonPath, KeyPathLimits, Mapping, ResolutionReason, Result,
};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
struct Server {
    name: String,
    address: IpAddr,
    port: u16,
    homepage: Option<Url>,
    tags: Vec<String>,
}

impl FromMapping for Server {
    fn from_mapping(mapping: Mapping<'_>) -> Result<Self> {
        Ok(Self {
            name: mapping.json("name")?,
            address: mapping.json("address")?,
            port: mapping.json("port")?,
            homepage: mapping.json_optional("homepage")?,
            tags: mapping
                .json_collection_optional("tags", InvalidItemPolicy::Remove)?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Cluster {
    region: String,
    servers: Vec<Server>,
}

impl FromMapping for Cluster {
    fn from_mapping(mapping: Mapping<'_>) -> Result<Self> {
        Ok(Self {
            region: mapping.json("region")?,
            servers: mapping.json_collection("servers", InvalidItemPolicy::Fail)?,
        })
    }
}

jsonkp_decode::decode_from_mapping!(Server, Cluster);

#[test]
fn scenario_a_dictionary_policies() {
    let doc = json!({"key": {"key1": "value1", "key2": 2}});

    let failed: Result<BTreeMap<String, String>> =
        decode_collection(&doc, "key", InvalidItemPolicy::Fail);
    match failed {
        Err(DecodeError::Coercion(failure)) => {
            assert_eq!(failure.key_path.last_segment(), Some("key2"));
            assert_eq!(failure.reason, CoercionReason::IncorrectType);
        }
        other => panic!("unexpected result {:?}", other),
    }

    let removed: BTreeMap<String, String> =
        decode_collection(&doc, "key", InvalidItemPolicy::Remove).unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed["key1"], "value1");

    let substituted: BTreeMap<String, String> =
        decode_collection(&doc, "key", InvalidItemPolicy::Value("default".into())).unwrap();
    assert_eq!(substituted["key2"], "default");
}

#[test]
fn scenario_b_calculated_array_value() {
    let doc = json!({"key": ["value1", 2]});
    let decoded: Vec<String> = decode_collection(
        &doc,
        "key",
        InvalidItemPolicy::calculate_value(|failure| failure.raw_value_string()),
    )
    .unwrap();
    assert_eq!(decoded.last().map(String::as_str), Some("2"));
}

#[test]
fn scenario_c_empty_sequence() {
    let doc = json!({"key": []});
    let decoded: Vec<u32> = decode_collection(&doc, "key", InvalidItemPolicy::Fail).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn composite_document() {
    let doc = json!({
        "cluster": {
            "region": "eu-west",
            "servers": [
                {
                    "name": "alpha",
                    "address": "10.0.0.1",
                    "port": 8080,
                    "homepage": "https://alpha.example.com/",
                    "tags": ["primary", 7, "ssd"]
                },
                {
                    "name": "beta",
                    "address": "10.0.0.2",
                    "port": 9090.0,
                    "homepage": null
                }
            ]
        }
    });

    let cluster: Cluster = doc.json("cluster").unwrap();
    assert_eq!(cluster.region, "eu-west");
    assert_eq!(cluster.servers.len(), 2);

    let alpha = &cluster.servers[0];
    assert_eq!(alpha.tags, vec!["primary", "ssd"]);
    assert_eq!(
        alpha.homepage.as_ref().map(Url::as_str),
        Some("https://alpha.example.com/")
    );

    let beta = &cluster.servers[1];
    assert_eq!(beta.port, 9090);
    assert!(beta.homepage.is_none());
    assert!(beta.tags.is_empty());

    let port: u16 = decode(&doc, "cluster.servers.1.port").unwrap();
    assert_eq!(port, 9090);
}

#[test]
fn deep_composite_failure_location() {
    let doc = json!({
        "cluster": {
            "region": "eu-west",
            "servers": [
                {"name": "alpha", "address": "10.0.0.1", "port": 70000}
            ]
        }
    });

    match doc.json::<Cluster>("cluster") {
        Err(DecodeError::Coercion(failure)) => {
            assert_eq!(failure.key_path.to_string(), "cluster.servers.0.port");
            assert_eq!(failure.value, json!(70000));
            assert_eq!(failure.reason, CoercionReason::IncorrectType);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn bad_address_is_conversion_failure() {
    let doc = json!({
        "servers": {
            "alpha": {"name": "alpha", "address": "not-an-ip", "port": 1},
            "beta": {"name": "beta", "address": "::1", "port": 2}
        }
    });

    let servers: HashMap<String, Server> =
        decode_collection(&doc, "servers", InvalidItemPolicy::Remove).unwrap();
    assert_eq!(servers.len(), 1);
    assert!(servers["beta"].address.is_loopback());

    let failed: Result<HashMap<String, Server>> =
        decode_collection(&doc, "servers", InvalidItemPolicy::Fail);
    match failed {
        Err(DecodeError::Coercion(failure)) => {
            assert_eq!(failure.key_path.to_string(), "servers.alpha.address");
            assert!(matches!(
                failure.reason,
                CoercionReason::CustomConversionFailed(_)
            ));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn missing_segment_through_arrays() {
    let doc = json!({"a": [{"b": {"c": 1}}]});
    match decode::<i64>(&doc, "a.0.b.x") {
        Err(DecodeError::MissingValue(failure)) => {
            assert_eq!(failure.failed_segment, "x");
            assert_eq!(failure.reached_path.to_string(), "a.0.b");
            assert_eq!(failure.reason, ResolutionReason::NotFound);
        }
        other => panic!("unexpected result {:?}", other),
    }

    match decode::<i64>(&doc, "a.0.b.c.d") {
        Err(DecodeError::MissingValue(failure)) => {
            assert_eq!(failure.failed_segment, "d");
            assert_eq!(failure.reason, ResolutionReason::WrongContainerKind);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn primitive_mismatches() {
    let doc = json!({"n": 2, "s": "2", "b": true, "f": 2.5});
    assert!(matches!(decode::<String>(&doc, "n"), Err(DecodeError::Coercion(_))));
    assert!(matches!(decode::<i32>(&doc, "s"), Err(DecodeError::Coercion(_))));
    assert!(matches!(decode::<i32>(&doc, "b"), Err(DecodeError::Coercion(_))));
    assert!(matches!(decode::<i32>(&doc, "f"), Err(DecodeError::Coercion(_))));
    assert_eq!(decode::<f64>(&doc, "f").unwrap(), 2.5);
}

#[test]
fn shared_document_across_threads() {
    let doc = std::sync::Arc::new(json!({"items": ["a", 1, "b", 2, "c"]}));
    let decoder = Decoder::new(KeyPathLimits::default()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = doc.clone();
            let decoder = decoder.clone();
            std::thread::spawn(move || {
                decoder
                    .decode_collection::<Vec<String>>(&doc, "items", InvalidItemPolicy::Remove)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["a", "b", "c"]);
    }
}

#[test]
fn error_messages_carry_the_path() {
    let doc = json!({"key": {"key1": "value1", "key2": 2}});
    let err = decode::<String>(&doc, "key.key2").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("key.key2"), "{}", message);
    assert!(message.contains("incorrect type"), "{}", message);

    let err = decode::<String>(&doc, "key.key3").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Missing value"), "{}", message);
    assert!(message.contains("key1, key2"), "{}", message);
}
