//! Entity recognition: finds known services in free-text plans.
//!
//! Each [`ServiceDescriptor`] of a registry is compiled into a matcher. A
//! service is recognized when any of its detection patterns matches the
//! lower-cased plan text. Multiplicity comes from counting the literal service
//! key in the same text:
//!
//! - key found `n > 1` times: `n` components `{key}_1` .. `{key}_n`
//! - otherwise: one component identified by the key
//!
//! Counting is plain substring counting, so a key embedded in an unrelated word
//! is counted as well.

use log::{debug, trace};
use regex::Regex;

use cloudsketch_core::{
    graph::Component,
    registry::{ServiceDescriptor, ServiceRegistry},
};

use crate::error::{Error, Result};

/// Lower-cases plan text for matching.
pub fn normalize(plan_text: &str) -> String {
    plan_text.to_lowercase()
}

/// Compiled detection patterns of one service.
#[derive(Debug)]
struct ServiceMatcher {
    service: ServiceDescriptor,
    detectors: Vec<Regex>,
    /// Matches a single word that names this service, e.g. `server` for `ec2`.
    alias: Regex,
}

impl ServiceMatcher {
    fn new(service: &ServiceDescriptor) -> Result<Self> {
        let detectors = service
            .patterns()
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|err| Error::invalid_pattern(service.key(), pattern, err))
            })
            .collect::<Result<Vec<_>>>()?;

        let alias_source = format!(
            "^(?:{}|{})$",
            regex::escape(service.key()),
            service.patterns().join("|")
        );
        let alias = Regex::new(&alias_source)
            .map_err(|err| Error::invalid_pattern(service.key(), alias_source.as_str(), err))?;

        Ok(Self {
            service: service.clone(),
            detectors,
            alias,
        })
    }

    fn is_detected(&self, normalized: &str) -> bool {
        self.detectors
            .iter()
            .any(|detector| detector.is_match(normalized))
    }
}

/// Recognizes the services of a registry in plan text.
///
/// A recognizer is built once per registry and can be shared across threads.
///
/// # Example
///
/// ```
/// # use cloudsketch_core::registry::ServiceRegistry;
/// # use cloudsketch_parser::Recognizer;
/// let recognizer = Recognizer::new(ServiceRegistry::builtin()).unwrap();
/// let components = recognizer.recognize("ec2 ec2 ec2 server");
///
/// let ids: Vec<_> = components.iter().map(|c| c.id()).collect();
/// assert_eq!(ids, ["ec2_1", "ec2_2", "ec2_3"]);
/// ```
#[derive(Debug)]
pub struct Recognizer {
    matchers: Vec<ServiceMatcher>,
}

impl Recognizer {
    /// Compiles every service of `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidServiceKey`] for keys that are not usable as
    /// identifiers, [`Error::DuplicateService`] when a key is declared twice,
    /// [`Error::InstanceIdCollision`] when a key looks like an instance id of
    /// another service, and [`Error::InvalidPattern`] when a detection pattern
    /// does not compile.
    pub fn new(registry: &ServiceRegistry) -> Result<Self> {
        let mut matchers: Vec<ServiceMatcher> = Vec::with_capacity(registry.len());

        for service in registry.all() {
            validate_key(service.key())?;
            if matchers.iter().any(|m| m.service.key() == service.key()) {
                return Err(Error::DuplicateService(service.key().to_string()));
            }
            matchers.push(ServiceMatcher::new(service)?);
        }

        for service in registry.all() {
            if let Some(owner) = registry
                .all()
                .iter()
                .find(|other| is_instance_id_of(service.key(), other.key()))
            {
                return Err(Error::InstanceIdCollision {
                    key: service.key().to_string(),
                    service: owner.key().to_string(),
                });
            }
        }

        debug!(services = matchers.len(); "Recognizer compiled");
        Ok(Self { matchers })
    }

    /// Recognizes services in `plan_text`.
    ///
    /// Components are returned in registry declaration order; instances of the
    /// same service are contiguous and ordered by instance index.
    pub fn recognize(&self, plan_text: &str) -> Vec<Component> {
        let normalized = normalize(plan_text);
        let mut components = Vec::new();

        for matcher in &self.matchers {
            if !matcher.is_detected(&normalized) {
                continue;
            }

            let service = &matcher.service;
            let count = normalized.matches(service.key()).count();
            trace!(service = service.key(), count; "Service detected");

            if count > 1 {
                components.extend((1..=count).map(|index| Component::instance(service, index)));
            } else {
                components.push(Component::single(service));
            }
        }

        debug!(components = components.len(); "Recognition finished");
        components
    }

    /// Returns the key of the service named by a single lower-case `word`.
    ///
    /// A word names a service when it is the service key or is entirely
    /// matched by one of the service's detection patterns. The first service
    /// in declaration order wins.
    pub fn service_for_word(&self, word: &str) -> Option<&str> {
        self.matchers
            .iter()
            .find(|matcher| matcher.alias.is_match(word))
            .map(|matcher| matcher.service.key())
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidServiceKey(key.to_string()))
    }
}

/// Returns whether `key` has the shape `{owner}_{digits}`.
fn is_instance_id_of(key: &str, owner: &str) -> bool {
    key.strip_prefix(owner)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|index| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
}
