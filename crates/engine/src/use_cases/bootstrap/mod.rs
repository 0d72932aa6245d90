//! Bootstrap use case.
//!
//! Issues a [`BootstrapPlan`] against the admin port, one step at a time and
//! in order. The first failing step aborts the run; steps already applied
//! stay applied.

use std::sync::Arc;

use crudinit_domain::{baseline_plan, BootstrapPlan, BootstrapStep, DatabaseName, DomainError};

use crate::infrastructure::ports::{AdminError, ClockPort, DatabaseAdmin};


// =============================================================================
// Reports
// =============================================================================

/// What a successful run created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub collections_created: Vec<String>,
    pub indexes_created: usize,
    pub documents_inserted: usize,
}

/// State of one collection as read back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub name: String,
    pub indexes: Vec<String>,
    pub documents: u64,
}

/// Read-back of the whole database, collections sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSummary {
    pub collections: Vec<CollectionSummary>,
}

impl DatabaseSummary {
    pub fn collection(&self, name: &str) -> Option<&CollectionSummary> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name.as_str()).collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Bootstrap step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: AdminError,
    },
    #[error("Invalid bootstrap plan: {0}")]
    Domain(#[from] DomainError),
}

impl BootstrapError {
    /// The admin error behind a failed step, if any.
    pub fn admin_error(&self) -> Option<&AdminError> {
        match self {
            Self::Step { source, .. } => Some(source),
            Self::Domain(_) => None,
        }
    }
}

// =============================================================================
// Bootstrap
// =============================================================================

/// Runs bootstrap plans against one database.
pub struct Bootstrap {
    admin: Arc<dyn DatabaseAdmin>,
    clock: Arc<dyn ClockPort>,
}

impl Bootstrap {
    pub fn new(admin: Arc<dyn DatabaseAdmin>, clock: Arc<dyn ClockPort>) -> Self {
        Self { admin, clock }
    }

    /// Apply every step of `plan` in order.
    ///
    /// No step is retried or skipped. Running the same plan against a
    /// database that already went through it fails on the first collection.
    pub async fn execute(&self, plan: &BootstrapPlan) -> Result<BootstrapReport, BootstrapError> {
        tracing::info!(
            database = %plan.database(),
            steps = plan.steps().len(),
            "Starting database bootstrap"
        );

        let mut report = BootstrapReport::default();
        for (position, step) in plan.steps().iter().enumerate() {
            tracing::debug!(step = position + 1, "{}", step);

            if let Err(source) = self.apply(step, &mut report).await {
                tracing::error!(
                    step = position + 1,
                    error = %source,
                    "Bootstrap aborted, earlier steps are left in place"
                );
                return Err(BootstrapError::Step {
                    step: step.to_string(),
                    source,
                });
            }
        }

        tracing::info!(
            database = %plan.database(),
            collections = report.collections_created.len(),
            indexes = report.indexes_created,
            documents = report.documents_inserted,
            "Database bootstrap complete"
        );
        Ok(report)
    }

    /// Build the baseline plan for `database` and run it.
    pub async fn execute_baseline(
        &self,
        database: DatabaseName,
    ) -> Result<BootstrapReport, BootstrapError> {
        let plan = baseline_plan(database)?;
        self.execute(&plan).await
    }

    async fn apply(
        &self,
        step: &BootstrapStep,
        report: &mut BootstrapReport,
    ) -> Result<(), AdminError> {
        match step {
            BootstrapStep::CreateCollection { name, validator } => {
                self.admin
                    .create_collection(name, validator.as_ref().map(|v| v.to_validator()))
                    .await?;
                report.collections_created.push(name.to_string());
            }
            BootstrapStep::CreateIndex(index) => {
                self.admin.create_index(index).await?;
                report.indexes_created += 1;
            }
            BootstrapStep::InsertSeeds {
                collection,
                documents,
            } => {
                let now = self.clock.now();
                let documents = documents.iter().map(|seed| seed.stamp(now)).collect();
                report.documents_inserted += self.admin.insert_many(collection, documents).await?;
            }
        }
        Ok(())
    }

    /// Read back collections, their index names and document counts.
    pub async fn summarize(&self) -> Result<DatabaseSummary, AdminError> {
        let mut names = self.admin.list_collection_names().await?;
        names.sort();

        let mut collections = Vec::with_capacity(names.len());
        for name in names {
            let indexes = self.admin.list_index_names(&name).await?;
            let documents = self.admin.count_documents(&name).await?;
            collections.push(CollectionSummary {
                name,
                indexes,
                documents,
            });
        }
        Ok(DatabaseSummary { collections })
    }
}
