use std::path::PathBuf;

use busplan_optimizer::json::schema::generate_json_schema;

use crate::file_utils::write_output;

pub fn run(out: Option<PathBuf>) -> Result<(), anyhow::Error> {
    let schema = generate_json_schema()?;
    write_output(out.as_deref(), &schema)
}
