//! Canonical detail schemas for caller-supplied resource probes.
//!
//! The engine does not know how to reach a database or a broker; callers
//! wrap their clients in closures and use these builders so the rendered
//! details match the documented schema.

use super::Details;

/// Database check details: `component`, `type`, `dbProduct`, `dbVersion`.
pub fn database(db_type: &str, product: Option<&str>, version: Option<&str>) -> Details {
    let mut d = Details::new();
    d.insert("component".into(), "database".into());
    d.insert("type".into(), db_type.into());
    if let Some(product) = product {
        d.insert("dbProduct".into(), product.into());
    }
    if let Some(version) = version {
        d.insert("dbVersion".into(), version.into());
    }
    d
}

/// Broker check details: `component`, `type`, `nodeCount`, `clusterId`.
pub fn kafka(node_count: u64, cluster_id: &str) -> Details {
    let mut d = Details::new();
    d.insert("component".into(), "kafka".into());
    d.insert("type".into(), "kafka".into());
    d.insert("nodeCount".into(), node_count.into());
    d.insert("clusterId".into(), cluster_id.into());
    d
}

/// Document store check details: `component`, `type`, `firstCollection`.
/// Succeeding with zero collections is still UP; `firstCollection` is then
/// absent.
pub fn mongo(first_collection: Option<&str>) -> Details {
    let mut d = Details::new();
    d.insert("component".into(), "mongo".into());
    d.insert("type".into(), "mongo".into());
    if let Some(first) = first_collection {
        d.insert("firstCollection".into(), first.into());
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_schema() {
        let d = database("postgres", Some("PostgreSQL"), Some("16.2"));
        assert_eq!(d["component"], "database");
        assert_eq!(d["type"], "postgres");
        assert_eq!(d["dbProduct"], "PostgreSQL");
    }

    #[test]
    fn mongo_without_collections() {
        let d = mongo(None);
        assert_eq!(d["type"], "mongo");
        assert!(!d.contains_key("firstCollection"));
    }
}
