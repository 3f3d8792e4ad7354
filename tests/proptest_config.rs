//! Property-based tests using proptest
//!
//! These tests check connection config resolution, scope handling and
//! project id validation over randomized inputs.

use gcp_dns::dns::factory::ClientConfig;
use gcp_dns::dns::scope::READWRITE;
use gcp_dns::gcp::project_id::validate_project_id;
use gcp_dns::{DnsOptions, ProjectResolver, Scope};
use proptest::prelude::*;

struct Ambient(Option<String>);

impl ProjectResolver for Ambient {
    fn resolve(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Generate syntactically valid project ids
fn arb_project_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{4,28}[a-z0-9]"
}

fn arb_options() -> impl Strategy<Value = DnsOptions> {
    (
        prop::option::of(prop::collection::vec("[a-z./:]{1,40}", 0..4)),
        prop::option::of(0u32..20),
        prop::option::of(1u64..120_000),
    )
        .prop_map(|(scopes, retries, timeout_ms)| DnsOptions {
            scope: scopes.map(Scope::new),
            retries,
            timeout: timeout_ms.map(std::time::Duration::from_millis),
        })
}

proptest! {
    /// Generated project ids are accepted by validation
    #[test]
    fn valid_project_ids_pass(project in arb_project_id()) {
        prop_assert!(validate_project_id(&project));
    }

    /// Any uppercase character makes a project id invalid
    #[test]
    fn uppercase_project_ids_fail(project in "[a-z]{3,10}[A-Z][a-z]{3,10}") {
        prop_assert!(!validate_project_id(&project));
    }

    /// An explicit non-empty project is used as-is, whatever the ambient value
    #[test]
    fn explicit_project_is_used_verbatim(
        project in "[^\\s]{1,40}",
        ambient in prop::option::of(arb_project_id()),
        options in arb_options(),
    ) {
        let resolved = ClientConfig {
            project: Some(project.clone()),
            keyfile: None,
            options,
        }
        .resolve(&Ambient(ambient))
        .unwrap();
        prop_assert_eq!(resolved.project, project);
    }

    /// Retries default to 3 and are otherwise forwarded unchanged
    #[test]
    fn retries_default_or_forwarded(options in arb_options()) {
        let expected = options.retries.unwrap_or(3);
        let resolved = ClientConfig {
            project: Some("my-dns-project".into()),
            keyfile: None,
            options,
        }
        .resolve(&Ambient(None))
        .unwrap();
        prop_assert_eq!(resolved.retries, expected);
    }

    /// Resolution never yields an empty scope set
    #[test]
    fn resolved_scope_is_never_empty(options in arb_options()) {
        let resolved = ClientConfig {
            project: Some("my-dns-project".into()),
            keyfile: None,
            options,
        }
        .resolve(&Ambient(None))
        .unwrap();
        prop_assert!(!resolved.scope.scopes().is_empty());
    }

    /// Non-empty scope sequences keep their order
    #[test]
    fn scope_sequence_keeps_order(scopes in prop::collection::vec("[a-z]{1,12}", 1..6)) {
        let scope = Scope::new(scopes.clone());
        prop_assert_eq!(scope.scopes(), scopes.as_slice());
    }
}

#[test]
fn unset_scope_resolves_to_readwrite_only() {
    let resolved = ClientConfig {
        project: Some("my-dns-project".into()),
        ..Default::default()
    }
    .resolve(&Ambient(None))
    .unwrap();
    assert_eq!(resolved.scope.scopes(), &[READWRITE.to_string()]);
}
