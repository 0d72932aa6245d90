//! Ordered bootstrap plan.
//!
//! A plan is the full list of administrative steps, in the order they will be
//! issued. It carries no state about the target database; running a plan
//! twice against the same database is expected to fail on the second run.

use std::fmt;

use crate::error::DomainError;
use crate::index::IndexDeclaration;
use crate::names::{CollectionName, DatabaseName};
use crate::schema::JsonSchema;
use crate::seed::SeedDocument;

// ============================================================================
// BootstrapStep
// ============================================================================

/// A single administrative call.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapStep {
    /// Create a collection, optionally attaching a `$jsonSchema` validator.
    CreateCollection {
        name: CollectionName,
        validator: Option<JsonSchema>,
    },
    /// Create an index on an existing collection.
    CreateIndex(IndexDeclaration),
    /// Insert literal documents (ordered insert).
    InsertSeeds {
        collection: CollectionName,
        documents: Vec<SeedDocument>,
    },
}

impl BootstrapStep {
    /// The collection this step targets.
    pub fn collection(&self) -> &CollectionName {
        match self {
            Self::CreateCollection { name, .. } => name,
            Self::CreateIndex(index) => index.collection(),
            Self::InsertSeeds { collection, .. } => collection,
        }
    }
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateCollection {
                name,
                validator: Some(_),
            } => write!(f, "create collection {name} with schema validator"),
            Self::CreateCollection {
                name,
                validator: None,
            } => write!(f, "create collection {name}"),
            Self::CreateIndex(index) => write!(f, "create index {index}"),
            Self::InsertSeeds {
                collection,
                documents,
            } => write!(f, "insert {} seed documents into {collection}", documents.len()),
        }
    }
}

// ============================================================================
// BootstrapPlan
// ============================================================================

/// Steps to run against one database, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapPlan {
    database: DatabaseName,
    steps: Vec<BootstrapStep>,
}

impl BootstrapPlan {
    pub fn new(database: DatabaseName) -> Self {
        Self {
            database,
            steps: Vec::new(),
        }
    }

    /// Append a step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if the step creates a collection the
    /// plan already creates, or references a collection the plan has not
    /// created yet.
    pub fn push(&mut self, step: BootstrapStep) -> Result<(), DomainError> {
        let created = self.collections();
        match &step {
            BootstrapStep::CreateCollection { name, .. } => {
                if created.contains(&name) {
                    return Err(DomainError::constraint(format!(
                        "collection {name} is created twice"
                    )));
                }
            }
            BootstrapStep::CreateIndex(_) | BootstrapStep::InsertSeeds { .. } => {
                if !created.contains(&step.collection()) {
                    return Err(DomainError::constraint(format!(
                        "step '{step}' references {} before it is created",
                        step.collection()
                    )));
                }
            }
        }
        if let BootstrapStep::CreateIndex(index) = &step {
            if self
                .indexes_for(index.collection().as_str())
                .iter()
                .any(|existing| existing.name() == index.name())
            {
                return Err(DomainError::constraint(format!(
                    "index {index} is declared twice"
                )));
            }
        }
        self.steps.push(step);
        Ok(())
    }

    /// Builder-style [`push`](Self::push).
    pub fn then(mut self, step: BootstrapStep) -> Result<Self, DomainError> {
        self.push(step)?;
        Ok(self)
    }

    pub fn database(&self) -> &DatabaseName {
        &self.database
    }

    pub fn steps(&self) -> &[BootstrapStep] {
        &self.steps
    }

    /// Collections created by the plan, in creation order.
    pub fn collections(&self) -> Vec<&CollectionName> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                BootstrapStep::CreateCollection { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Collections created with a validator, paired with it.
    pub fn validated_collections(&self) -> Vec<(&CollectionName, &JsonSchema)> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                BootstrapStep::CreateCollection {
                    name,
                    validator: Some(schema),
                } => Some((name, schema)),
                _ => None,
            })
            .collect()
    }

    /// Index declarations targeting `collection`, in plan order.
    pub fn indexes_for(&self, collection: &str) -> Vec<&IndexDeclaration> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                BootstrapStep::CreateIndex(index) if index.collection() == collection => {
                    Some(index)
                }
                _ => None,
            })
            .collect()
    }

    /// Seed documents targeting `collection`.
    pub fn seeds_for(&self, collection: &str) -> Vec<&SeedDocument> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                BootstrapStep::InsertSeeds {
                    collection: target,
                    documents,
                } if target == collection => Some(documents.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}
