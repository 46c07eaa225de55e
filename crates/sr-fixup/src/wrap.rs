//! Idempotency wrapping for synthesized DDL.
//!
//! Replaceable object kinds get `CREATE OR REPLACE`; everything else is
//! wrapped in a target-dialect `DO` block that checks the catalog before
//! executing, or into a guarded drop-then-create pair when configured.

use crate::error::{FixupError, FixupResult};
use sr_core::config::IdempotencyMode;
use sr_core::object::{ObjectRef, ObjectType};

/// Wrap one CREATE statement according to the idempotency mode.
///
/// Returns the statements to execute, in order.
pub fn wrap_statement(
    object: &ObjectRef,
    ddl: &str,
    mode: IdempotencyMode,
) -> FixupResult<Vec<String>> {
    match mode {
        IdempotencyMode::None => Ok(vec![ddl.to_string()]),
        IdempotencyMode::Replace => Ok(vec![make_replace(object, ddl)?]),
        IdempotencyMode::Guard => Ok(vec![guard_block(object, ddl)]),
        IdempotencyMode::DropCreate => Ok(vec![drop_statement(object), ddl.to_string()]),
    }
}

/// The idempotency mode used for an object type under this guard config.
pub fn mode_for(object_type: &ObjectType, guard_mode: IdempotencyMode) -> IdempotencyMode {
    if object_type.is_replaceable() {
        IdempotencyMode::Replace
    } else {
        guard_mode
    }
}

fn make_replace(object: &ObjectRef, ddl: &str) -> FixupResult<String> {
    if !object.object_type.is_replaceable() {
        return Err(FixupError::ReplaceUnsupported {
            object: object.to_string(),
        });
    }
    let trimmed = ddl.trim_start();
    let upper = trimmed.to_uppercase();
    if upper.starts_with("CREATE OR REPLACE") {
        return Ok(ddl.to_string());
    }
    if upper.starts_with("CREATE ") {
        let rest = &trimmed["CREATE".len()..];
        return Ok(format!("CREATE OR REPLACE{rest}"));
    }
    // Not a CREATE statement at all; pass through unchanged.
    Ok(ddl.to_string())
}

/// Existence-guarded execution block in the target dialect.
fn guard_block(object: &ObjectRef, ddl: &str) -> String {
    let escaped = ddl.replace('\'', "''");
    format!(
        "DO $$\nBEGIN\n  IF {} THEN\n    EXECUTE '{}';\n  END IF;\nEND\n$$;",
        absence_predicate(object),
        escaped
    )
}

/// Catalog predicate that is true when the object does not yet exist.
fn absence_predicate(object: &ObjectRef) -> String {
    match object.object_type {
        ObjectType::Table
        | ObjectType::View
        | ObjectType::MaterializedView
        | ObjectType::Index
        | ObjectType::Sequence => {
            format!("to_regclass('{}') IS NULL", object.qualified_name())
        }
        ObjectType::Trigger => format!(
            "NOT EXISTS (SELECT 1 FROM pg_trigger WHERE tgname = lower('{}'))",
            object.name
        ),
        ObjectType::Constraint => format!(
            "NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = lower('{}'))",
            object.name
        ),
        _ => format!(
            "NOT EXISTS (SELECT 1 FROM pg_proc WHERE proname = lower('{}'))",
            object.name
        ),
    }
}

fn drop_statement(object: &ObjectRef) -> String {
    format!(
        "DROP {} IF EXISTS {}",
        drop_keyword(&object.object_type),
        object.qualified_name()
    )
}

fn drop_keyword(object_type: &ObjectType) -> &'static str {
    match object_type {
        ObjectType::Table => "TABLE",
        ObjectType::View => "VIEW",
        ObjectType::MaterializedView => "MATERIALIZED VIEW",
        ObjectType::Index => "INDEX",
        ObjectType::Sequence => "SEQUENCE",
        ObjectType::Trigger => "TRIGGER",
        ObjectType::Synonym => "SYNONYM",
        ObjectType::Package => "PACKAGE",
        ObjectType::PackageBody => "PACKAGE BODY",
        ObjectType::Procedure => "PROCEDURE",
        ObjectType::Function => "FUNCTION",
        ObjectType::TypeSpec | ObjectType::TypeBody => "TYPE",
        ObjectType::Constraint | ObjectType::Unknown(_) => "OBJECT",
    }
}

#[cfg(test)]
#[path = "wrap_test.rs"]
mod tests;
