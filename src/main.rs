use std::io::Read;
use std::str::FromStr;

use container_stats::container::ContainerID;
use container_stats::{cgroup, storage};

/// Debug entry point for the container introspection pipeline.
///
/// Takes a single argument: a container id, whose inspect document is looked
/// up in CRI-O overlay storage, or `-` to read an inspect document from
/// stdin. Prints the resulting stats as JSON on stdout.
///
/// # Examples
///
/// ```bash
/// crictl inspect -o json <id> | container-stats -
/// container-stats 4a2b...c9
/// ```
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let arg = std::env::args()
        .nth(1)
        .ok_or("usage: container-stats <container-id | ->")?;

    let doc = if arg == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        let id = ContainerID::from_str(&arg)?;
        storage::read_container_config(&id)?
    };

    let stats = cgroup::stats_from_inspect(&doc)?;
    println!("{}", serde_json::to_string(&stats)?);
    Ok(())
}
