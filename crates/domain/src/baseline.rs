//! Baseline state of the CRUD demo database.
//!
//! Collection and field names are the ones the applications query, so they
//! are kept exactly as deployed.

use crate::error::DomainError;
use crate::index::IndexDeclaration;
use crate::names::{CollectionName, DatabaseName};
use crate::plan::{BootstrapPlan, BootstrapStep};
use crate::schema::{FieldRule, JsonSchema};
use crate::seed::{SeedUser, UserRole};

pub const DEFAULT_DATABASE: &str = "crud_database";

/// Primary collection, the only one with a validator.
pub const USERS: &str = "usuarios";
/// Product catalog.
pub const PRODUCTS: &str = "produtos";
/// Content posts.
pub const POSTS: &str = "posts";
/// Sales records.
pub const SALES: &str = "vendas";

/// Email shape accepted by the users validator.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 150;

/// Validator for the users collection.
pub fn users_schema() -> Result<JsonSchema, DomainError> {
    JsonSchema::object()
        .required(
            "nome",
            FieldRule::string()
                .with_min_length(1)
                .with_description("Nome do usuário - obrigatório"),
        )
        .required(
            "email",
            FieldRule::string()
                .with_pattern(EMAIL_PATTERN)
                .with_description("Email válido - obrigatório"),
        )
        .required(
            "idade",
            FieldRule::int()
                .with_range(MIN_AGE, MAX_AGE)
                .with_description("Idade entre 0 e 150 anos - obrigatório"),
        )
        .optional(
            "cidade",
            FieldRule::string().with_description("Cidade do usuário - opcional"),
        )
        .optional(
            "ativo",
            FieldRule::bool().with_description("Status ativo do usuário"),
        )
        .build()
}

/// The two demo accounts: one administrator, one standard user.
pub fn seed_users() -> Vec<SeedUser> {
    vec![
        SeedUser::new("Admin User", "admin@exemplo.com", 30, UserRole::Administrator)
            .with_city("São Paulo"),
        SeedUser::new("Usuário Teste", "teste@exemplo.com", 25, UserRole::Standard)
            .with_city("Rio de Janeiro"),
    ]
}

/// Lookup indexes for the collections without validators.
const SECONDARY_INDEXES: &[(&str, &[(&str, bool)])] = &[
    (
        PRODUCTS,
        &[("nome", false), ("categoria", false), ("preco", false), ("ativo", false)],
    ),
    (
        POSTS,
        &[
            ("titulo", false),
            ("autor", false),
            ("tags", false),
            ("publicado", false),
            ("data_publicacao", true),
        ],
    ),
    (
        SALES,
        &[("produto", false), ("vendedor", false), ("data_venda", true)],
    ),
];

/// Build the full bootstrap plan for `database`.
///
/// Order: users collection, its unique email index, its lookup indexes, the
/// seed users, then the three plain collections followed by their indexes.
pub fn baseline_plan(database: DatabaseName) -> Result<BootstrapPlan, DomainError> {
    let users = CollectionName::new(USERS)?;
    let mut plan = BootstrapPlan::new(database);

    plan.push(BootstrapStep::CreateCollection {
        name: users.clone(),
        validator: Some(users_schema()?),
    })?;

    plan.push(BootstrapStep::CreateIndex(
        IndexDeclaration::ascending(users.clone(), "email")?.unique(),
    ))?;
    for field in ["nome", "idade", "cidade", "ativo"] {
        plan.push(BootstrapStep::CreateIndex(IndexDeclaration::ascending(
            users.clone(),
            field,
        )?))?;
    }

    plan.push(BootstrapStep::InsertSeeds {
        collection: users,
        documents: seed_users().into_iter().map(SeedUser::into_seed).collect(),
    })?;

    for (collection, _) in SECONDARY_INDEXES {
        plan.push(BootstrapStep::CreateCollection {
            name: CollectionName::new(*collection)?,
            validator: None,
        })?;
    }
    for (collection, fields) in SECONDARY_INDEXES {
        let collection = CollectionName::new(*collection)?;
        for (field, descending) in fields.iter() {
            let index = if *descending {
                IndexDeclaration::descending(collection.clone(), *field)?
            } else {
                IndexDeclaration::ascending(collection.clone(), *field)?
            };
            plan.push(BootstrapStep::CreateIndex(index))?;
        }
    }

    Ok(plan)
}
