//! Transport settings behavior through the public API.
//!
//! Covers:
//! - Defaults and per-field validation
//! - Rejected writes leave the previous value in place
//! - Case-insensitive sub-protocol equality and hashing
//! - Duplication independence

use chrono::TimeDelta;
use proptest::prelude::*;
use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};
use ws_transport_settings::config::{
    infinite_keep_alive_interval, is_rfc6455_token_char, SubProtocolError, SubProtocolRules,
    ValidationPolicy,
};
use ws_transport_settings::{SettingsError, TransportSettings, TransportUsage};

fn hash_of(settings: &TransportSettings) -> u64 {
    let mut hasher = DefaultHasher::new();
    settings.hash(&mut hasher);
    hasher.finish()
}

fn expected_sub_protocol_ok(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().all(is_rfc6455_token_char)
}

// ===========================================================================
// Defaults
// ===========================================================================

#[test]
fn test_default_instances_are_equal() {
    let a = TransportSettings::new();
    let b = TransportSettings::default();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

// ===========================================================================
// Field validation
// ===========================================================================

#[test]
fn test_transport_usage_round_trips_every_member() {
    let mut settings = TransportSettings::new();
    for usage in TransportUsage::ALL {
        settings.set_transport_usage(usage);
        assert_eq!(settings.transport_usage(), usage);

        settings.set_transport_usage_value(usage.code()).unwrap();
        assert_eq!(settings.transport_usage(), usage);
    }
}

#[test]
fn test_transport_usage_rejects_unknown_code() {
    let mut settings = TransportSettings::new();
    settings.set_transport_usage(TransportUsage::WhenDuplex);
    for code in [3_u8, 42, u8::MAX] {
        let err = settings.set_transport_usage_value(code).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidEnumerationValue { .. }));
        assert_eq!(settings.transport_usage(), TransportUsage::WhenDuplex);
    }
}

#[test]
fn test_keep_alive_boundaries() {
    let mut settings = TransportSettings::new();

    assert!(matches!(
        settings.set_keep_alive_interval(TimeDelta::milliseconds(-5)),
        Err(SettingsError::OutOfRange { .. })
    ));
    assert!(settings.set_keep_alive_interval(TimeDelta::zero()).is_ok());
    assert!(settings
        .set_keep_alive_interval(infinite_keep_alive_interval())
        .is_ok());

    let max = settings.policy().max_keep_alive_interval();
    assert!(settings.set_keep_alive_interval(max).is_ok());
    assert_eq!(settings.keep_alive_interval(), max);
    assert!(matches!(
        settings.set_keep_alive_interval(max + TimeDelta::milliseconds(1)),
        Err(SettingsError::OutOfRange { .. })
    ));
    assert_eq!(settings.keep_alive_interval(), max);
}

#[test]
fn test_sub_protocol_spec_cases() {
    let mut settings = TransportSettings::new();

    settings.set_sub_protocol(Some("chat")).unwrap();
    assert_eq!(settings.sub_protocol(), Some("chat"));

    assert!(matches!(
        settings.set_sub_protocol(Some("")),
        Err(SettingsError::InvalidArgument {
            reason: SubProtocolError::Empty,
            ..
        })
    ));
    assert!(matches!(
        settings.set_sub_protocol(Some("a,b")),
        Err(SettingsError::InvalidArgument {
            reason: SubProtocolError::MultipleProtocols { .. },
            ..
        })
    ));
    assert_eq!(settings.sub_protocol(), Some("chat"));

    settings.set_sub_protocol(None).unwrap();
    assert_eq!(settings.sub_protocol(), None);
}

#[test]
fn test_invalid_character_is_named_in_error() {
    let mut settings = TransportSettings::new();
    let err = settings.set_sub_protocol(Some("chat/v2")).unwrap_err();
    match err {
        SettingsError::InvalidArgument {
            reason: SubProtocolError::InvalidCharacter { character, .. },
            ..
        } => assert_eq!(character, '/'),
        other => panic!("expected invalid character error, got {other:?}"),
    }
}

#[test]
fn test_custom_sub_protocol_rules_are_honored() {
    let policy = ValidationPolicy::new(
        TimeDelta::hours(1),
        SubProtocolRules::new([',', ' '], |ch| ch.is_ascii_lowercase() || ch == '-'),
    )
    .unwrap();
    let mut settings = TransportSettings::with_policy(policy);
    assert!(settings.set_sub_protocol(Some("json-rpc")).is_ok());
    assert!(settings.set_sub_protocol(Some("Chat")).is_err());
    assert!(settings.set_sub_protocol(Some("a b")).is_err());
    assert_eq!(settings.sub_protocol(), Some("json-rpc"));
}

#[test]
fn test_max_pending_connections_boundaries() {
    let mut settings = TransportSettings::new();
    assert!(matches!(
        settings.set_max_pending_connections(-1),
        Err(SettingsError::OutOfRange { .. })
    ));
    assert!(settings.set_max_pending_connections(0).is_ok());
    assert!(settings.set_max_pending_connections(i32::MAX).is_ok());
    assert_eq!(settings.max_pending_connections(), i32::MAX);
}

// ===========================================================================
// Equality, hashing and duplication
// ===========================================================================

#[test]
fn test_sub_protocol_case_insensitive_equality_and_hash() {
    let mut chat = TransportSettings::new();
    let mut shout = TransportSettings::new();
    chat.set_sub_protocol(Some("Chat")).unwrap();
    shout.set_sub_protocol(Some("CHAT")).unwrap();

    assert_eq!(chat, shout);
    assert_eq!(hash_of(&chat), hash_of(&shout));

    let set: HashSet<TransportSettings> = [chat.clone(), shout.clone()].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_clone_is_equal_and_independent() {
    let mut source = TransportSettings::new();
    source.set_transport_usage(TransportUsage::Always);
    source.set_create_notification_on_connection(true);
    source
        .set_keep_alive_interval(TimeDelta::seconds(15))
        .unwrap();
    source.set_sub_protocol(Some("graphql-ws")).unwrap();
    source.set_disable_payload_masking(true);
    source.set_max_pending_connections(64).unwrap();

    let mut snapshot = source.clone();
    assert_eq!(snapshot, source);

    snapshot.set_transport_usage(TransportUsage::Never);
    snapshot.set_create_notification_on_connection(false);
    snapshot.set_keep_alive_interval(TimeDelta::zero()).unwrap();
    snapshot.set_sub_protocol(None).unwrap();
    snapshot.set_disable_payload_masking(false);
    snapshot.set_max_pending_connections(1).unwrap();

    assert_eq!(source.transport_usage(), TransportUsage::Always);
    assert!(source.create_notification_on_connection());
    assert_eq!(source.keep_alive_interval(), TimeDelta::seconds(15));
    assert_eq!(source.sub_protocol(), Some("graphql-ws"));
    assert!(source.disable_payload_masking());
    assert_eq!(source.max_pending_connections(), 64);
}

#[test]
fn test_policy_ceiling_cannot_exclude_defaults() {
    let err = ValidationPolicy::new(TimeDelta::milliseconds(-5), SubProtocolRules::default())
        .unwrap_err();
    assert!(matches!(err, SettingsError::OutOfRange { .. }));

    let policy = ValidationPolicy::with_max_keep_alive_interval(TimeDelta::zero()).unwrap();
    let settings = TransportSettings::with_policy(policy);
    assert_eq!(settings.clone(), settings);
}

#[test]
fn test_serialized_keep_alive_reloads_equal() {
    let mut settings = TransportSettings::new();
    settings
        .set_keep_alive_interval(TimeDelta::milliseconds(1500))
        .unwrap();
    let json = serde_json::to_string(&settings).unwrap();
    let restored: TransportSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, settings);

    assert!(settings
        .set_keep_alive_interval(TimeDelta::microseconds(1500))
        .is_err());
    assert_eq!(settings.keep_alive_interval(), TimeDelta::milliseconds(1500));
}

#[test]
fn test_settings_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportSettings>();
}

proptest! {
    #[test]
    fn sub_protocol_validation_matches_predicate(raw in proptest::collection::vec(any::<char>(), 0..=16)) {
        let candidate: String = raw.into_iter().collect();
        let mut settings = TransportSettings::new();
        let accepted = settings.set_sub_protocol(Some(&candidate)).is_ok();
        prop_assert_eq!(accepted, expected_sub_protocol_ok(&candidate));
        if accepted {
            prop_assert_eq!(settings.sub_protocol(), Some(candidate.as_str()));
        } else {
            prop_assert_eq!(settings.sub_protocol(), None);
        }
    }

    #[test]
    fn sub_protocol_case_never_changes_equality(token in "[!#$%&'*+.^_`|~0-9A-Za-z-]{1,24}") {
        let mut lower = TransportSettings::new();
        let mut upper = TransportSettings::new();
        lower.set_sub_protocol(Some(&token.to_lowercase())).unwrap();
        upper.set_sub_protocol(Some(&token.to_uppercase())).unwrap();
        prop_assert_eq!(&lower, &upper);
        prop_assert_eq!(hash_of(&lower), hash_of(&upper));
    }

    #[test]
    fn keep_alive_round_trips_valid_values(ms in 0_i64..=i64::from(i32::MAX)) {
        let mut settings = TransportSettings::new();
        let interval = TimeDelta::milliseconds(ms);
        prop_assert!(settings.set_keep_alive_interval(interval).is_ok());
        prop_assert_eq!(settings.keep_alive_interval(), interval);
    }

    #[test]
    fn accepted_keep_alive_survives_serialization(
        ms in 0_i64..i64::from(i32::MAX),
        sub_ms_nanos in prop_oneof![Just(0_i64), 1_i64..1_000_000],
    ) {
        let mut settings = TransportSettings::new();
        let interval = TimeDelta::milliseconds(ms) + TimeDelta::nanoseconds(sub_ms_nanos);
        let accepted = settings.set_keep_alive_interval(interval).is_ok();
        prop_assert_eq!(accepted, sub_ms_nanos == 0);

        let json = serde_json::to_string(&settings).unwrap();
        let restored: TransportSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&restored, &settings);
    }

    #[test]
    fn keep_alive_rejects_other_negatives(ms in i64::MIN / 2..-1_i64) {
        let mut settings = TransportSettings::new();
        let rejected = matches!(
            settings.set_keep_alive_interval(TimeDelta::milliseconds(ms)),
            Err(SettingsError::OutOfRange { .. })
        );
        prop_assert!(rejected);
        prop_assert!(settings.keep_alive_interval().is_zero());
    }

    #[test]
    fn max_pending_connections_round_trips(limit in any::<i32>()) {
        let mut settings = TransportSettings::new();
        let accepted = settings.set_max_pending_connections(limit).is_ok();
        prop_assert_eq!(accepted, limit >= 0);
        let expected = if accepted { limit } else { 0 };
        prop_assert_eq!(settings.max_pending_connections(), expected);
    }

    #[test]
    fn clone_preserves_equality(
        usage in 0_u8..3,
        notify in any::<bool>(),
        masking in any::<bool>(),
        pending in 0_i32..10_000,
        keep_alive_ms in 0_i64..600_000,
    ) {
        let mut settings = TransportSettings::new();
        settings.set_transport_usage_value(usage).unwrap();
        settings.set_create_notification_on_connection(notify);
        settings.set_disable_payload_masking(masking);
        settings.set_max_pending_connections(pending).unwrap();
        settings.set_keep_alive_interval(TimeDelta::milliseconds(keep_alive_ms)).unwrap();

        let copy = settings.duplicate().unwrap();
        prop_assert_eq!(&copy, &settings);
        prop_assert_eq!(hash_of(&copy), hash_of(&settings));
    }
}
