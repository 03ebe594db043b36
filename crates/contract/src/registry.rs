//! Asset-kind registry.
//!
//! Maps a kind tag (`"farmer"`, `"gap"`, ...) to a type-erased handler that
//! runs the generic handlers with that kind's payload type.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use agritrace_core::asset::AssetKind;
use agritrace_db::models::{
    ExporterKind, FarmerKind, GapKind, GmpKind, PackerKind, PackingKind, RegulatorKind, StaffKind,
};
use agritrace_db::TxContext;
use async_trait::async_trait;

use crate::config::ContractConfig;
use crate::error::{ContractError, ContractResult};
use crate::handlers;
use crate::operation::Operation;

/// One registered asset kind.
#[async_trait]
pub trait KindHandler: Send + Sync {
    fn tag(&self) -> &'static str;

    async fn handle(
        &self,
        ctx: &TxContext<'_>,
        operation: Operation,
        args: &str,
        config: &ContractConfig,
    ) -> ContractResult<String>;
}

/// Dispatches every operation to the generic handlers for kind `K`.
pub struct TypedHandler<K>(PhantomData<K>);

impl<K> Default for TypedHandler<K> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<K: AssetKind> KindHandler for TypedHandler<K> {
    fn tag(&self) -> &'static str {
        K::TAG
    }

    async fn handle(
        &self,
        ctx: &TxContext<'_>,
        operation: Operation,
        args: &str,
        config: &ContractConfig,
    ) -> ContractResult<String> {
        match operation {
            Operation::Create => handlers::create::<K>(ctx, args).await,
            Operation::CreateMany => handlers::create_many::<K>(ctx, args).await,
            Operation::Read => handlers::read::<K>(ctx, args).await,
            Operation::Update => handlers::update::<K>(ctx, args).await,
            Operation::Delete => handlers::delete::<K>(ctx, args).await,
            Operation::Transfer => handlers::transfer::<K>(ctx, args).await,
            Operation::List => handlers::list::<K>(ctx, args, config).await,
            Operation::FindByField => handlers::find_by_field::<K>(ctx, args).await,
            Operation::History => handlers::history::<K>(ctx, args).await,
            Operation::LatestHistory => handlers::latest_history::<K>(ctx, args).await,
            Operation::Exists => handlers::exists::<K>(ctx, args).await,
        }
    }
}

/// Tag → handler table.
pub struct KindRegistry {
    handlers: BTreeMap<&'static str, Box<dyn KindHandler>>,
}

impl Default for KindRegistry {
    /// Registry with every built-in kind.
    fn default() -> Self {
        Self::empty()
            .register::<FarmerKind>()
            .register::<GapKind>()
            .register::<GmpKind>()
            .register::<PackerKind>()
            .register::<PackingKind>()
            .register::<ExporterKind>()
            .register::<RegulatorKind>()
            .register::<StaffKind>()
    }
}

impl KindRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register kind `K` under its tag, replacing any previous entry.
    pub fn register<K: AssetKind>(mut self) -> Self {
        self.handlers
            .insert(K::TAG, Box::new(TypedHandler::<K>::default()));
        self
    }

    pub fn get(&self, tag: &str) -> ContractResult<&dyn KindHandler> {
        self.handlers
            .get(tag)
            .map(|h| &**h)
            .ok_or_else(|| ContractError::UnknownKind(tag.to_owned()))
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}
