//! Placeholder token dispatcher.
//!
//! The [`Dispatcher`] maps a raw token to a handler through two tables:
//!
//! 1. Prefix handlers, tried longest prefix first, receive the remainder of
//!    the token as their argument (`has_permission_<node>`)
//! 2. Static handlers are looked up by exact key (`health`)
//!
//! A token that matches neither resolves to `None`, which callers treat as
//! "not mine". An empty string is a valid resolved value.
//!
//! ```rust,ignore
//! use tessera_framework::{Dispatcher, Liveness};
//!
//! let dispatcher = Dispatcher::new()
//!     .with_static("name", Liveness::Any, |_, subject| subject.name().to_string())
//!     .with_prefix("has_permission_", Liveness::Live, |ctx, subject, node| {
//!         Some(ctx.settings().render_bool(subject.has_permission(node)))
//!     });
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{Level, span, trace, warn};

use crate::context::ResolveContext;
use tessera_core::Subject;

/// Resolver for a static key.
pub type StaticFn = Arc<dyn Fn(&ResolveContext, &dyn Subject) -> String + Send + Sync>;

/// Resolver for a prefix that needs a subject.
pub type SubjectPrefixFn =
    Arc<dyn Fn(&ResolveContext, &dyn Subject, &str) -> Option<String> + Send + Sync>;

/// Decides whether a prefix argument names a placeholder at all.
pub type ArgumentFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Resolver for a prefix that works without a subject.
pub type GlobalPrefixFn = Arc<dyn Fn(&ResolveContext, &str) -> Option<String> + Send + Sync>;

/// Whether a handler needs a connected subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Resolves for offline subjects too.
    Any,
    /// Resolves to an empty string unless the subject is online.
    Live,
}

#[derive(Clone)]
struct StaticEntry {
    liveness: Liveness,
    resolve: StaticFn,
}

#[derive(Clone)]
enum PrefixHandler {
    Global(GlobalPrefixFn),
    Subject {
        liveness: Liveness,
        /// Checked before liveness, so an unknown argument stays unknown
        /// for offline and missing subjects.
        accepts: Option<ArgumentFilter>,
        resolve: SubjectPrefixFn,
    },
}

#[derive(Clone)]
struct PrefixEntry {
    prefix: String,
    handler: PrefixHandler,
}

/// A token split into its key and optional dynamic argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedToken<'a> {
    /// Static key, or the matched prefix for dynamic tokens.
    pub static_key: &'a str,
    /// Remainder after a matched prefix.
    pub argument: Option<&'a str>,
}

/// Routes placeholder tokens to their handlers.
///
/// Registration is not thread-safe; build the dispatcher once, then share
/// it immutably.
#[derive(Default, Clone)]
pub struct Dispatcher {
    /// Sorted by descending prefix length.
    prefixes: Vec<PrefixEntry>,
    statics: IndexMap<String, StaticEntry>,
}

impl Dispatcher {
    /// Creates a new, empty dispatcher.
    pub fn new() -> Self {
        Self {
            prefixes: Vec::new(),
            statics: IndexMap::new(),
        }
    }

    /// Registers a static key. A previous handler for `key` is replaced.
    pub fn add_static<F>(&mut self, key: impl Into<String>, liveness: Liveness, resolve: F)
    where
        F: Fn(&ResolveContext, &dyn Subject) -> String + Send + Sync + 'static,
    {
        let key = key.into();
        let entry = StaticEntry {
            liveness,
            resolve: Arc::new(resolve),
        };
        if self.statics.insert(key.clone(), entry).is_some() {
            warn!(key = %key, "Static placeholder registered twice, replacing");
        }
    }

    /// Registers a prefix whose handler needs a subject.
    pub fn add_prefix<F>(&mut self, prefix: impl Into<String>, liveness: Liveness, resolve: F)
    where
        F: Fn(&ResolveContext, &dyn Subject, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.insert_prefix(
            prefix.into(),
            PrefixHandler::Subject {
                liveness,
                accepts: None,
                resolve: Arc::new(resolve),
            },
        );
    }

    /// Registers a subject prefix that only answers for arguments passing
    /// `accepts`; other arguments resolve to `None` regardless of subject.
    pub fn add_checked_prefix<A, F>(
        &mut self,
        prefix: impl Into<String>,
        liveness: Liveness,
        accepts: A,
        resolve: F,
    ) where
        A: Fn(&str) -> bool + Send + Sync + 'static,
        F: Fn(&ResolveContext, &dyn Subject, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.insert_prefix(
            prefix.into(),
            PrefixHandler::Subject {
                liveness,
                accepts: Some(Arc::new(accepts)),
                resolve: Arc::new(resolve),
            },
        );
    }

    /// Registers a prefix whose handler does not need a subject.
    pub fn add_global_prefix<F>(&mut self, prefix: impl Into<String>, resolve: F)
    where
        F: Fn(&ResolveContext, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.insert_prefix(prefix.into(), PrefixHandler::Global(Arc::new(resolve)));
    }

    /// Registers a static key (builder pattern).
    pub fn with_static<F>(mut self, key: impl Into<String>, liveness: Liveness, resolve: F) -> Self
    where
        F: Fn(&ResolveContext, &dyn Subject) -> String + Send + Sync + 'static,
    {
        self.add_static(key, liveness, resolve);
        self
    }

    /// Registers a subject prefix (builder pattern).
    pub fn with_prefix<F>(mut self, prefix: impl Into<String>, liveness: Liveness, resolve: F) -> Self
    where
        F: Fn(&ResolveContext, &dyn Subject, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.add_prefix(prefix, liveness, resolve);
        self
    }

    /// Registers a global prefix (builder pattern).
    pub fn with_global_prefix<F>(mut self, prefix: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&ResolveContext, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.add_global_prefix(prefix, resolve);
        self
    }

    fn insert_prefix(&mut self, prefix: String, handler: PrefixHandler) {
        if let Some(existing) = self.prefixes.iter_mut().find(|e| e.prefix == prefix) {
            warn!(prefix = %prefix, "Prefix placeholder registered twice, replacing");
            existing.handler = handler;
            return;
        }
        self.prefixes.push(PrefixEntry { prefix, handler });
        self.prefixes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    }

    /// Returns the number of static keys.
    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    /// Returns the number of prefixes.
    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }

    /// Static keys in registration order.
    pub fn static_keys(&self) -> impl Iterator<Item = &str> {
        self.statics.keys().map(String::as_str)
    }

    /// Prefixes in match order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(|e| e.prefix.as_str())
    }

    /// Clears all registered handlers.
    pub fn clear(&mut self) {
        self.prefixes.clear();
        self.statics.clear();
    }

    fn match_prefix<'t>(&self, token: &'t str) -> Option<(&PrefixEntry, &'t str)> {
        self.prefixes.iter().find_map(|entry| {
            token
                .strip_prefix(entry.prefix.as_str())
                .map(|argument| (entry, argument))
        })
    }

    /// Splits `token` the way [`dispatch`](Self::dispatch) would.
    pub fn parse<'t>(&'t self, token: &'t str) -> ParsedToken<'t> {
        match self.match_prefix(token) {
            Some((entry, argument)) => ParsedToken {
                static_key: &entry.prefix,
                argument: Some(argument),
            },
            None => ParsedToken {
                static_key: token,
                argument: None,
            },
        }
    }

    /// Resolves `token` against `subject`.
    ///
    /// Returns `None` for an unknown token. Subject handlers resolve to an
    /// empty string when there is no subject, or when they need a live
    /// subject and it is offline.
    pub fn dispatch(
        &self,
        ctx: &ResolveContext,
        token: &str,
        subject: Option<&dyn Subject>,
    ) -> Option<String> {
        let span = span!(Level::TRACE, "resolve", token);
        let _enter = span.enter();

        if let Some((entry, argument)) = self.match_prefix(token) {
            trace!(prefix = %entry.prefix, argument, "Matched prefix");
            return match &entry.handler {
                PrefixHandler::Global(resolve) => resolve(ctx, argument),
                PrefixHandler::Subject {
                    liveness,
                    accepts,
                    resolve,
                } => {
                    if accepts.as_ref().is_some_and(|accepts| !accepts(argument)) {
                        trace!("Argument not accepted");
                        return None;
                    }
                    match available(subject, *liveness) {
                        Some(subject) => resolve(ctx, subject, argument),
                        None => Some(String::new()),
                    }
                }
            };
        }

        let Some(entry) = self.statics.get(token) else {
            trace!("Unknown placeholder");
            return None;
        };
        Some(match available(subject, entry.liveness) {
            Some(subject) => (entry.resolve)(ctx, subject),
            None => String::new(),
        })
    }
}

/// The subject, if present and live enough for `liveness`.
fn available(subject: Option<&dyn Subject>, liveness: Liveness) -> Option<&dyn Subject> {
    subject.filter(|s| liveness == Liveness::Any || s.is_online())
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("prefixes", &self.prefixes().collect::<Vec<_>>())
            .field("static_count", &self.statics.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Settings;
    use crate::format::RuleSet;
    use tessera_core::{Accessors, Capabilities, EnvironmentVersion, Host, SubjectSnapshot};

    struct TestHost;

    impl Host for TestHost {
        fn version_string(&self) -> String {
            "1.20.4".into()
        }
    }

    fn ctx() -> ResolveContext {
        let caps = Capabilities::for_version(EnvironmentVersion::new(1, 20, 4));
        ResolveContext::new(
            Arc::new(TestHost),
            Arc::new(Accessors::new(caps)),
            Arc::new(RuleSet::default()),
            Arc::new(Settings::default()),
        )
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new()
            .with_global_prefix("ping_", |_, name| Some(format!("plain:{name}")))
            .with_global_prefix("colored_ping_", |_, name| Some(format!("colored:{name}")))
            .with_prefix("locale_", Liveness::Live, |_, _, variant| {
                (variant == "short").then(|| "en".to_string())
            })
            .with_static("name", Liveness::Any, |_, s| s.name().to_string())
            .with_static("health", Liveness::Live, |_, _| "20.0".to_string())
    }

    #[test]
    fn test_longest_prefix_wins() {
        let d = dispatcher();
        let ctx = ctx();
        assert_eq!(
            d.dispatch(&ctx, "colored_ping_Alice", None).as_deref(),
            Some("colored:Alice")
        );
        assert_eq!(
            d.dispatch(&ctx, "ping_Alice", None).as_deref(),
            Some("plain:Alice")
        );
    }

    #[test]
    fn test_prefix_order_ignores_registration_order() {
        let d = Dispatcher::new()
            .with_global_prefix("a_", |_, _| Some("short".into()))
            .with_global_prefix("a_b_", |_, _| Some("long".into()));
        assert_eq!(d.prefixes().collect::<Vec<_>>(), ["a_b_", "a_"]);
        assert_eq!(d.dispatch(&ctx(), "a_b_c", None).as_deref(), Some("long"));
    }

    #[test]
    fn test_parse_splits_argument() {
        let d = dispatcher();
        assert_eq!(
            d.parse("colored_ping_Bob"),
            ParsedToken {
                static_key: "colored_ping_",
                argument: Some("Bob"),
            }
        );
        assert_eq!(
            d.parse("health"),
            ParsedToken {
                static_key: "health",
                argument: None,
            }
        );
    }

    #[test]
    fn test_unknown_is_distinct_from_empty() {
        let d = dispatcher();
        let ctx = ctx();
        let offline = SubjectSnapshot::new("Bob").offline();
        assert_eq!(d.dispatch(&ctx, "no_such_key", Some(&offline)), None);
        assert_eq!(d.dispatch(&ctx, "health", Some(&offline)).as_deref(), Some(""));
    }

    #[test]
    fn test_offline_subject_restricts_keys() {
        let d = dispatcher();
        let ctx = ctx();
        let offline = SubjectSnapshot::new("Bob").offline();
        let online = SubjectSnapshot::new("Bob");
        assert_eq!(d.dispatch(&ctx, "name", Some(&offline)).as_deref(), Some("Bob"));
        assert_eq!(d.dispatch(&ctx, "health", Some(&online)).as_deref(), Some("20.0"));
        assert_eq!(d.dispatch(&ctx, "locale_short", Some(&offline)).as_deref(), Some(""));
        assert_eq!(d.dispatch(&ctx, "locale_short", Some(&online)).as_deref(), Some("en"));
        assert_eq!(d.dispatch(&ctx, "locale_bogus", Some(&online)), None);
    }

    #[test]
    fn test_checked_prefix_is_unknown_for_any_subject() {
        let mut d = dispatcher();
        d.add_checked_prefix(
            "locale_",
            Liveness::Live,
            |variant| variant == "short",
            |_, _, _| Some("en".to_string()),
        );
        let ctx = ctx();
        let offline = SubjectSnapshot::new("Bob").offline();
        let online = SubjectSnapshot::new("Bob");
        let subjects: [Option<&dyn Subject>; 3] = [None, Some(&offline), Some(&online)];
        for subject in subjects {
            assert_eq!(d.dispatch(&ctx, "locale_bogus", subject), None);
        }
        assert_eq!(d.dispatch(&ctx, "locale_short", Some(&offline)).as_deref(), Some(""));
        assert_eq!(d.dispatch(&ctx, "locale_short", Some(&online)).as_deref(), Some("en"));
        assert_eq!(d.prefix_count(), 3);
    }

    #[test]
    fn test_missing_subject() {
        let d = dispatcher();
        let ctx = ctx();
        assert_eq!(d.dispatch(&ctx, "name", None).as_deref(), Some(""));
        assert_eq!(d.dispatch(&ctx, "ping_Carol", None).as_deref(), Some("plain:Carol"));
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let mut d = dispatcher();
        d.add_static("name", Liveness::Any, |_, _| "renamed".into());
        d.add_global_prefix("ping_", |_, _| Some("replaced".into()));
        assert_eq!(d.static_count(), 2);
        assert_eq!(d.prefix_count(), 3);
        let ctx = ctx();
        let alice = SubjectSnapshot::new("Alice");
        assert_eq!(d.dispatch(&ctx, "name", Some(&alice)).as_deref(), Some("renamed"));
        assert_eq!(d.dispatch(&ctx, "ping_x", None).as_deref(), Some("replaced"));
    }

    #[test]
    fn test_clear() {
        let mut d = dispatcher();
        d.clear();
        assert_eq!(d.static_count() + d.prefix_count(), 0);
        assert_eq!(d.dispatch(&ctx(), "name", None), None);
    }
}
