use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        columns.push(format!(
            "    {} {}{}",
            col.name,
            col.col_type.sql_type(),
            null_constraint
        ));
    }

    columns.push(format!("    PRIMARY KEY ({})", schema.primary_key.join(", ")));

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({}) ON DELETE CASCADE",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate DROP TABLE SQL. Fails on a missing table so an out of order
/// or repeated delete is reported.
pub fn generate_drop_table(schema: &TableSchema) -> String {
    format!("DROP TABLE {}", schema.name)
}

/// Generate a positional INSERT statement covering every column
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{ITEMS, ITEM_ORIGINS, RECIPE_INGREDIENTS, WORLDS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&ITEMS);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS items"));
        assert!(sql.contains("item_id INTEGER NOT NULL"));
        assert!(sql.contains("item_level INTEGER,"));
        assert!(sql.contains("PRIMARY KEY (item_id)"));
        assert!(!sql.contains("FOREIGN KEY"));
    }

    #[test]
    fn test_composite_key_and_cascade() {
        let sql = generate_create_table(&ITEM_ORIGINS);
        assert!(sql.contains("PRIMARY KEY (item_id, origin)"));
        assert!(sql.contains("FOREIGN KEY (item_id) REFERENCES items(item_id) ON DELETE CASCADE"));

        let sql = generate_create_table(&RECIPE_INGREDIENTS);
        assert!(sql.contains("REFERENCES recipes(recipe_id) ON DELETE CASCADE"));
        assert!(sql.contains("REFERENCES items(item_id) ON DELETE CASCADE"));
    }

    #[test]
    fn test_generate_insert() {
        assert_eq!(
            generate_insert(&WORLDS),
            "INSERT INTO worlds (world_id, name, datacenter, is_public) VALUES (?1, ?2, ?3, ?4)"
        );
    }

    #[test]
    fn test_generate_drop_table() {
        assert_eq!(generate_drop_table(&ITEMS), "DROP TABLE items");
    }
}
