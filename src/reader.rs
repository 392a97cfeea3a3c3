//! Print the arrays of every episode.
use std::io::Write;
use std::path::Path;

use hdf5::{File, Group};
use log::debug;

use crate::group::{data_group, episodes, members, Member};
use crate::types::AnyArray;

/// Visit every array of every episode in native order.
///
/// `f` is called with the episode name, the path of the array relative to the episode
/// (`actions`, `obs/agentview_image`) and its values. Only one array is held in memory
/// at a time. Returns the number of arrays visited.
pub fn visit_arrays<P, F>(path: P, mut f: F) -> Result<usize, anyhow::Error>
where
    P: AsRef<Path>,
    F: FnMut(&str, &str, &AnyArray) -> Result<(), anyhow::Error>,
{
    let file = File::open(path)?;
    let data = data_group(&file)?;

    let mut n = 0;
    for (episode, group) in episodes(&data)? {
        debug!("Reading {}..", episode);
        n += visit_group(&group, &episode, "", &mut f)?;
    }

    Ok(n)
}

fn visit_group<F>(
    group: &Group,
    episode: &str,
    prefix: &str,
    f: &mut F,
) -> Result<usize, anyhow::Error>
where
    F: FnMut(&str, &str, &AnyArray) -> Result<(), anyhow::Error>,
{
    let mut n = 0;

    for (m, member) in members(group)? {
        let name = format!("{prefix}{m}");

        match member {
            Member::Array(ds) => {
                let values = AnyArray::read(&ds)?;
                f(episode, &name, &values)?;
                n += 1;
            }
            Member::Group(g) => n += visit_group(&g, episode, &format!("{name}/"), f)?,
        }
    }

    Ok(n)
}

/// Print every episode array to `out`.
///
/// With `verbose` each array is preceded by a `<episode>/<array> <dtype> <shape>` line.
pub fn read_dataset<P, W>(path: P, mut out: W, verbose: bool) -> Result<usize, anyhow::Error>
where
    P: AsRef<Path>,
    W: Write,
{
    let n = visit_arrays(path, |episode, name, values| {
        if verbose {
            writeln!(
                out,
                "{}/{} {} {:?}",
                episode,
                name,
                values.dtype_name(),
                values.shape()
            )?;
        }
        writeln!(out, "{values}")?;
        Ok(())
    })?;

    out.flush()?;

    Ok(n)
}
