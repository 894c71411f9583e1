//! Height-gated dispatch of module handlers
//!
//! The router owns the version threshold table and a registry of handler
//! variants, one per (module kind, protocol version). It is constructed
//! explicitly and injected into the service; there is no process-wide
//! singleton, so tests can run alternate tables side by side.
//!
//! Dispatch is deliberately asymmetric. A message that resolves to an
//! unregistered version is a hard routing error: silently picking a
//! fallback handler would let this node diverge from the rest of the
//! network. An end-block hook that resolves to an unregistered version
//! fails closed with an empty tag set instead, because a failed end-block
//! would halt block finalization outright.

use crate::domain::version::{ProtocolVersion, VersionTable};
use crate::error::{SettlementError, SettlementResult};
use crate::events::EventTag;
use async_trait::async_trait;
use settle_types::Height;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Closed set of module kinds wired through version dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleKind {
    Rewards,
    Orders,
}

/// A protocol-level message addressed to one module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMessage {
    /// Module-local route, e.g. `"orders/cancel"`.
    pub route: String,
    /// Message body; the handler variant owns its decoding.
    pub payload: serde_json::Value,
}

/// One module's behavior under one protocol version.
#[async_trait]
pub trait ModuleHandler: Send + Sync {
    /// Execute a message; errors reject the message without affecting the
    /// enclosing block.
    async fn handle_message(
        &self,
        height: Height,
        message: &ModuleMessage,
    ) -> SettlementResult<Vec<EventTag>>;

    /// Module end-block hook.
    async fn end_block(&self, height: Height) -> SettlementResult<Vec<EventTag>>;
}

/// Height-keyed dispatch table over module handler variants.
pub struct VersionRouter {
    table: VersionTable,
    handlers: BTreeMap<(ModuleKind, ProtocolVersion), Arc<dyn ModuleHandler>>,
}

impl VersionRouter {
    pub fn new(table: VersionTable) -> Self {
        Self {
            table,
            handlers: BTreeMap::new(),
        }
    }

    /// Register a module's handler variant for one protocol version.
    pub fn register(
        &mut self,
        module: ModuleKind,
        version: ProtocolVersion,
        handler: Arc<dyn ModuleHandler>,
    ) {
        self.handlers.insert((module, version), handler);
    }

    /// Active protocol version at a height.
    pub fn resolve(&self, height: Height) -> ProtocolVersion {
        self.table.resolve(height)
    }

    /// Route a message to the handler variant active at `height`.
    ///
    /// A missing handler is an unrecoverable routing error, never a silent
    /// fallback.
    pub async fn dispatch_message(
        &self,
        height: Height,
        module: ModuleKind,
        message: &ModuleMessage,
    ) -> SettlementResult<Vec<EventTag>> {
        let version = self.resolve(height);
        let handler = self
            .handlers
            .get(&(module, version))
            .ok_or(SettlementError::Routing { height, version })?;
        handler.handle_message(height, message).await
    }

    /// Run every registered module's end-block hook at `height`.
    ///
    /// Fails closed: a module without a handler for the resolved version
    /// contributes nothing, and a hook error is logged and dropped. Modules
    /// run in `ModuleKind` order so the tag list is deterministic.
    pub async fn dispatch_end_block(&self, height: Height) -> Vec<EventTag> {
        let version = self.resolve(height);
        let modules: BTreeSet<ModuleKind> =
            self.handlers.keys().map(|(module, _)| *module).collect();

        let mut tags = Vec::new();
        for module in modules {
            let Some(handler) = self.handlers.get(&(module, version)) else {
                tracing::warn!(?module, ?version, height, "no end-block handler; skipping");
                continue;
            };
            match handler.end_block(height).await {
                Ok(module_tags) => tags.extend(module_tags),
                Err(err) => {
                    tracing::error!(?module, ?version, height, %err, "end-block hook failed");
                }
            }
        }
        tags
    }
}
