use super::{AccessPolicy, Signer, canonical_bytes};
use crate::broker::job::{Job, ParamValue, Params};
use crate::broker::message::{AckRequest, PollRequest};
use crate::utils::BrokerError;
use serde_json::json;

fn signer() -> Signer {
    Signer::new("test-secret").unwrap()
}

fn sample_job() -> Job {
    let mut params = Params::new();
    params.insert("path".into(), ParamValue::from("/tmp"));
    params.insert("count".into(), ParamValue::from(3_i64));
    Job {
        id: "job-1".into(),
        machine_id: "m1".into(),
        command: "ls".into(),
        params,
        ts: 1_725_000_000,
    }
}

#[test]
fn test_empty_secret_is_rejected() {
    assert!(matches!(Signer::new(""), Err(BrokerError::MissingSecret)));
}

#[test]
fn test_signature_is_hex_sha256() {
    let tag = signer().sign(b"hello");
    assert_eq!(tag.len(), 64);
    assert!(tag.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_known_hmac_vector() {
    // RFC 4231 test case 2
    let signer = Signer::new("Jefe").unwrap();
    assert_eq!(
        signer.sign(b"what do ya want for nothing?"),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn test_sign_then_verify() {
    let signer = signer();
    let bytes = canonical_bytes(&sample_job()).unwrap();
    let tag = signer.sign(&bytes);
    assert!(signer.verify(&bytes, &tag));
}

#[test]
fn test_any_single_byte_mutation_fails() {
    let signer = signer();
    let bytes = canonical_bytes(&sample_job()).unwrap();
    let tag = signer.sign(&bytes);

    for i in 0..bytes.len() {
        let mut mutated = bytes.clone();
        mutated[i] ^= 0x01;
        assert!(!signer.verify(&mutated, &tag), "mutation at byte {i} verified");
    }

    let tag_bytes = tag.as_bytes();
    for i in 0..tag_bytes.len() {
        let mut mutated = tag_bytes.to_vec();
        mutated[i] = if mutated[i] == b'0' { b'1' } else { b'0' };
        let mutated = String::from_utf8(mutated).unwrap();
        assert!(!signer.verify(&bytes, &mutated), "tag mutation at {i} verified");
    }
}

#[test]
fn test_malformed_or_truncated_tag_fails() {
    let signer = signer();
    let tag = signer.sign(b"body");
    assert!(!signer.verify(b"body", "not-hex"));
    assert!(!signer.verify(b"body", &tag[..62]));
    assert!(!signer.verify(b"body", ""));
}

#[test]
fn test_different_secret_fails() {
    let tag = signer().sign(b"body");
    let other = Signer::new("other-secret").unwrap();
    assert!(!other.verify(b"body", &tag));
}

#[test]
fn test_canonical_job_encoding() {
    let bytes = canonical_bytes(&sample_job()).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"command":"ls","id":"job-1","machine_id":"m1","params":{"count":3,"path":"/tmp"},"ts":1725000000}"#
    );
}

#[test]
fn test_canonical_encoding_ignores_key_order() {
    let a = json!({"machine_id": "m1", "capabilities": ["gpu"], "extra": {"z": 1, "a": 2}});
    let b = json!({"extra": {"a": 2, "z": 1}, "capabilities": ["gpu"], "machine_id": "m1"});
    assert_eq!(canonical_bytes(&a).unwrap(), canonical_bytes(&b).unwrap());
}

#[test]
fn test_typed_and_untyped_bodies_agree() {
    let typed = PollRequest {
        machine_id: "m1".into(),
        capabilities: vec!["docker".into()],
    };
    let untyped = json!({"capabilities": ["docker"], "machine_id": "m1"});
    assert_eq!(
        canonical_bytes(&typed).unwrap(),
        canonical_bytes(&untyped).unwrap()
    );
}

#[test]
fn test_verify_message_reports_bad_signature() {
    let signer = signer();
    let ack = AckRequest {
        job_id: "job-1".into(),
        status: "ok".into(),
        stdout: "done".into(),
        stderr: String::new(),
        took_ms: 12,
    };
    let tag = signer.sign_message(&ack).unwrap();
    assert!(signer.verify_message(&ack, &tag).is_ok());

    let tampered = AckRequest {
        took_ms: 13,
        ..ack
    };
    assert!(matches!(
        signer.verify_message(&tampered, &tag),
        Err(BrokerError::BadSignature)
    ));
}

#[test]
fn test_signer_debug_redacts_key() {
    let out = format!("{:?}", signer());
    assert!(!out.contains("test-secret"));
}

#[test]
fn test_policy_without_admin_key_is_open() {
    let policy = AccessPolicy::new(None, Vec::<String>::new());
    assert!(policy.require_admin(None).is_ok());
    assert!(policy.require_admin(Some("anything")).is_ok());
    assert!(!policy.admin_required());
}

#[test]
fn test_policy_empty_admin_key_is_open() {
    let policy = AccessPolicy::new(Some(String::new()), Vec::<String>::new());
    assert!(policy.require_admin(None).is_ok());
}

#[test]
fn test_policy_admin_key_checked() {
    let policy = AccessPolicy::new(Some("k3y".into()), Vec::<String>::new());
    assert!(policy.require_admin(Some("k3y")).is_ok());
    assert!(matches!(
        policy.require_admin(Some("k3")),
        Err(BrokerError::BadAdminKey)
    ));
    assert!(matches!(
        policy.require_admin(None),
        Err(BrokerError::BadAdminKey)
    ));
}

#[test]
fn test_policy_allow_list() {
    let open = AccessPolicy::new(None, Vec::<String>::new());
    assert!(open.machine_allowed("anyone"));

    let restricted = AccessPolicy::new(None, ["m1", "m2", ""]);
    assert!(restricted.machine_allowed("m1"));
    assert!(restricted.machine_allowed("m2"));
    assert!(!restricted.machine_allowed("m3"));
    assert!(!restricted.machine_allowed(""));
}

#[test]
fn test_sign_json_matches_machine_client() {
    let client = crate::client::MachineClient::new("m1", "test-secret").unwrap();

    let poll = client.poll_request(&["gpu"]).unwrap();
    let typed_tag = signer()
        .sign_json(r#"{ "machine_id": "m1", "capabilities": ["gpu"] }"#)
        .unwrap();
    assert_eq!(typed_tag, poll.signature);

    let ack = client.ack_request("job-1", "ok", "out", "", 9).unwrap();
    let body = json!({"took_ms": 9, "stderr": "", "stdout": "out", "status": "ok", "job_id": "job-1"});
    assert_eq!(signer().sign_json(&body.to_string()).unwrap(), ack.signature);
}

#[test]
fn test_sign_json_rejects_invalid_json() {
    assert!(matches!(
        signer().sign_json("{not json"),
        Err(BrokerError::Encoding(_))
    ));
}
