//! Traversal of the `data` group and its episodes.
use std::path::PathBuf;

use hdf5::{Dataset, File, Group};
use log::warn;

use crate::error::LookupError;

/// Top-level group holding the episodes.
pub const DATA_GROUP: &str = "data";

/// A child of a group: either an array or a nested group.
#[derive(Debug)]
pub enum Member {
    Array(Dataset),
    Group(Group),
}

/// Open the `data` group of `file`.
pub fn data_group(file: &File) -> Result<Group, anyhow::Error> {
    if !file.link_exists(DATA_GROUP) {
        return Err(LookupError::GroupNotFound {
            path: PathBuf::from(file.filename()),
            group: DATA_GROUP.to_string(),
        }
        .into());
    }

    Ok(file.group(DATA_GROUP)?)
}

/// The members of `group` in the library's native order.
pub fn members(group: &Group) -> Result<Vec<(String, Member)>, anyhow::Error> {
    group
        .member_names()?
        .into_iter()
        .map(|m| {
            let member = match group.dataset(&m) {
                Ok(ds) => Member::Array(ds),
                Err(_) => Member::Group(group.group(&m)?),
            };
            Ok::<_, anyhow::Error>((m, member))
        })
        .collect()
}

/// The episode groups under `data`. Arrays stored directly under `data` are not
/// episodes and are skipped.
pub fn episodes(data: &Group) -> Result<Vec<(String, Group)>, anyhow::Error> {
    Ok(members(data)?
        .into_iter()
        .filter_map(|(m, member)| match member {
            Member::Group(g) => Some((m, g)),
            Member::Array(_) => {
                warn!("{}/{}: not an episode group, skipping", data.name(), m);
                None
            }
        })
        .collect())
}
