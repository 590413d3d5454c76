//! Genesis Construction Service
//!
//! Orchestrates one construction: decode and validate the specification,
//! open a commitment store, commit the allocation, derive the header and
//! close the store. The store is always released before returning; on
//! failure nothing buffered is flushed.

use crate::error::{ConstructionFailure, GenesisError, Result};
use crate::metrics::ServiceMetrics;
use crate::persist::write_genesis_block;
use gf_01_commitment_store::{CommitmentStore, StoreHandle, StoreMode};
use gf_02_state_commitment::StateCommitmentBuilder;
use gf_03_header_derivation::HeaderDeriver;
use shared_types::{BlockHeader, GenesisSpec};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Debug, Default)]
pub struct GenesisService {
    builder: StateCommitmentBuilder,
    deriver: HeaderDeriver,
    metrics: Arc<ServiceMetrics>,
}

impl GenesisService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share counters with another owner (e.g. the HTTP gateway).
    pub fn with_metrics(metrics: Arc<ServiceMetrics>) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    pub fn metrics(&self) -> &Arc<ServiceMetrics> {
        &self.metrics
    }

    /// Construct the genesis header for a raw JSON specification.
    ///
    /// The specification is fully decoded before any store is opened, so an
    /// `InvalidSpec` error never touches the durable medium.
    pub fn construct(&self, raw_spec: &[u8], mode: &StoreMode) -> Result<BlockHeader> {
        let spec = match GenesisSpec::from_json(raw_spec) {
            Ok(spec) => spec,
            Err(e) => {
                self.metrics.record_invalid_spec();
                debug!("[gf-04] rejected specification: {}", e);
                return Err(e.into());
            }
        };
        self.construct_spec(&spec, mode)
    }

    /// Construct from an already decoded specification. It is validated
    /// again here.
    #[instrument(skip_all, fields(mode = mode.label(), accounts = spec.alloc.len()))]
    pub fn construct_spec(&self, spec: &GenesisSpec, mode: &StoreMode) -> Result<BlockHeader> {
        if let Err(e) = spec.validate() {
            self.metrics.record_invalid_spec();
            return Err(e.into());
        }

        let started = Instant::now();
        let store = CommitmentStore::open(mode).map_err(|e| {
            self.metrics.record_failure();
            warn!("[gf-04] cannot open commitment store: {}", e);
            GenesisError::from(e)
        })?;

        let header = match self.commit(spec, &store) {
            Ok(header) => header,
            Err(failure) => {
                let summary = store.discard();
                self.metrics.record_failure();
                warn!(
                    "[gf-04] construction failed ({} buffered entries dropped): {}",
                    summary.discarded, failure
                );
                return Err(failure.into());
            }
        };

        let summary = store.close().map_err(|e| {
            self.metrics.record_failure();
            warn!("[gf-04] flushing commitment store failed: {}", e);
            GenesisError::from(e)
        })?;

        let elapsed = started.elapsed();
        self.metrics.record_success(spec.alloc.len(), elapsed);
        info!(
            "[gf-04] genesis {:?} state root {:?} ({} accounts, {} entries flushed, {:?})",
            header.hash,
            header.state_root,
            spec.alloc.len(),
            summary.flushed,
            elapsed
        );
        Ok(header)
    }

    fn commit(
        &self,
        spec: &GenesisSpec,
        store: &StoreHandle,
    ) -> std::result::Result<BlockHeader, ConstructionFailure> {
        let state = self.builder.build(&spec.alloc, store)?;
        let header = self
            .deriver
            .derive(spec, state.root)
            .map_err(ConstructionFailure::Derivation)?;

        if store.is_durable() {
            write_genesis_block(store, &header, spec)?;
        }
        Ok(header)
    }
}
