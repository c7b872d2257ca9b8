//! URL templates for the entities a waterfall page links to.

pub fn waterfall_page(project: &str, skip: i64) -> String {
    format!("/waterfall/{project}?skip={skip}")
}

pub fn task(task_id: &str) -> String {
    format!("/task/{task_id}")
}

pub fn version(version_id: &str) -> String {
    format!("/version/{version_id}")
}

pub fn build_variant(project: &str, variant_id: &str) -> String {
    format!("/build_variant/{project}/{variant_id}")
}
