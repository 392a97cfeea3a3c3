//! Merge several dataset files into one, renumbering the episodes.
use std::path::Path;

use hdf5::File;
use log::{debug, info};

use crate::attrs::Attributes;
use crate::error::LookupError;
use crate::group::{data_group, episodes, DATA_GROUP};
use crate::raw::copy_object;

/// Prefix of the renumbered episode names.
pub const EPISODE_PREFIX: &str = "demo_";

#[derive(Debug, Default, Clone)]
pub struct MergeOptions {
    /// Truncate the destination if it exists instead of failing.
    pub overwrite: bool,
}

/// Merge `sources` into a new file at `dest`.
///
/// The `data` attributes of the first source are copied to the destination, attributes
/// of the other sources' `data` groups are ignored. Episodes are copied in source order
/// as stored, with their attributes and nested groups, and named `demo_1`, `demo_2`, ..
///
/// Every source is checked for a `data` group, and the first source's `data` attributes
/// are read, before the destination is created. `dest` may never be one of `sources`,
/// not even with [`MergeOptions::overwrite`].
///
/// Returns the number of episodes written.
pub fn merge_datasets<P, Q>(
    sources: &[P],
    dest: Q,
    opts: &MergeOptions,
) -> Result<usize, anyhow::Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let dest = dest.as_ref();

    ensure!(!sources.is_empty(), "no source datasets to merge");

    for src in sources {
        let f = File::open(src.as_ref())?;
        let n = episodes(&data_group(&f)?)?.len();
        debug!("{}: {} episodes", src.as_ref().display(), n);
    }

    let attrs = {
        let first = File::open(sources[0].as_ref())?;
        Attributes::read(&*data_group(&first)?)?
    };

    ensure_not_a_source(sources, dest)?;

    let fd = if opts.overwrite {
        File::create(dest)?
    } else {
        if dest.exists() {
            return Err(LookupError::DestinationExists(dest.into()).into());
        }
        File::create_excl(dest)?
    };

    let data = fd.create_group(DATA_GROUP)?;
    attrs.write(&data)?;

    let mut count = 0;

    for src in sources {
        let src = src.as_ref();
        let f = File::open(src)?;
        let sdata = data_group(&f)?;

        for (name, _) in episodes(&sdata)? {
            count += 1;
            let new_name = format!("{EPISODE_PREFIX}{count}");
            debug!("{}: {} -> {}", src.display(), name, new_name);

            copy_object(&sdata, &name, &data, &new_name)?;
        }
    }

    fd.flush()?;

    info!(
        "Merged {} datasets with {} demonstrations into {}",
        sources.len(),
        count,
        dest.display()
    );

    Ok(count)
}

/// Sources exist at this point, so an absent `dest` cannot be one of them.
fn ensure_not_a_source<P: AsRef<Path>>(
    sources: &[P],
    dest: &Path,
) -> Result<(), anyhow::Error> {
    if !dest.exists() {
        return Ok(());
    }

    let d = dest.canonicalize()?;

    for src in sources {
        if src.as_ref().canonicalize()? == d {
            return Err(LookupError::DestinationIsSource(dest.into()).into());
        }
    }

    Ok(())
}
