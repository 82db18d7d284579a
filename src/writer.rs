//! Binary graph output.
//!
//! The primary file holds
//!
//! ```text
//! nodes:  u32
//! offset: [u64; nodes]        cumulative degree through node i
//! target: [u32; offset[nodes-1]]
//! ```
//!
//! so node i's neighbors are `target[offset[i-1]..offset[i]]` (with
//! `offset[-1] = 0`). Weighted graphs also get a weight file holding
//! `[f32; offset[nodes-1]]` in the same order as `target`.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, warn};

use crate::endian::Endian;
use crate::error::{Error, Result};
use crate::graph::Graph;

impl Graph {
    /// Writes node count, cumulative degrees, and neighbor ids.
    pub fn write_links<W: Write>(&self, writer: &mut W, endian: Endian) -> io::Result<()> {
        endian.write_u32(writer, node_count(self.nodes())?)?;

        let mut total = 0u64;
        for list in self.lists() {
            total += list.len() as u64;
            endian.write_u64(writer, total)?;
        }

        for list in self.lists() {
            for &(dest, _) in list {
                endian.write_u32(writer, dest)?;
            }
        }
        Ok(())
    }

    /// Writes the weights parallel to the neighbor ids of `write_links`.
    pub fn write_weights<W: Write>(&self, writer: &mut W, endian: Endian) -> io::Result<()> {
        for list in self.lists() {
            for &(_, weight) in list {
                endian.write_f32(writer, weight as f32)?;
            }
        }
        Ok(())
    }

    /// Writes the binary graph to `output` and, in weighted mode, weights to `weights`.
    ///
    /// Each file is staged next to its destination and renamed into place
    /// only once every output has been written, so on error neither path
    /// holds a partial file. The primary file is renamed first; if the weight
    /// rename then fails, the new primary file is removed again, which also
    /// means a file left at `output` by an earlier run is gone.
    ///
    /// New files get the permissions `File::create` would give them; an
    /// existing destination keeps its permissions.
    pub fn save<P, Q>(&self, output: P, weights: Q, endian: Endian) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let output = output.as_ref();
        let weights = weights.as_ref();

        let links = stage(output, |w| self.write_links(w, endian))?;
        let staged_weights = if self.mode().is_weighted() {
            Some(stage(weights, |w| self.write_weights(w, endian))?)
        } else {
            None
        };

        links.persist(output).map_err(|e| Error::unwritable(output)(e.error))?;
        if let Some(staged) = staged_weights {
            if let Err(e) = staged.persist(weights) {
                if let Err(cleanup) = fs::remove_file(output) {
                    warn!(
                        path = %output.display(),
                        error = %cleanup,
                        "could not remove output after failure"
                    );
                }
                return Err(Error::unwritable(weights)(e.error));
            }
        }

        info!(
            path = %output.display(),
            nodes = self.nodes(),
            links = self.total_degree(),
            weighted = self.mode().is_weighted(),
            "binary graph written"
        );
        Ok(())
    }

    /// Prints one line per neighbor entry: `src dest`, plus ` weight` in weighted mode.
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let weighted = self.mode().is_weighted();
        for (node, list) in self.lists().iter().enumerate() {
            for &(dest, weight) in list {
                if weighted {
                    writeln!(writer, "{} {} {}", node, dest, weight as f32)?;
                } else {
                    writeln!(writer, "{} {}", node, dest)?;
                }
            }
        }
        Ok(())
    }
}

// writes through `fill` into a temporary file beside `path`.
fn stage<F>(path: &Path, fill: F) -> Result<NamedTempFile>
where
    F: FnOnce(&mut BufWriter<&mut fs::File>) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut staged = staging_file(dir, path).map_err(Error::unwritable(path))?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        fill(&mut writer).map_err(Error::unwritable(path))?;
        writer.flush().map_err(Error::unwritable(path))?;
    }
    staged.as_file().sync_all().map_err(Error::unwritable(path))?;
    debug!(path = %path.display(), staged = %staged.path().display(), "output staged");
    Ok(staged)
}

// a temporary file in `dir` with the permissions a plain create of `path` would end up with.
fn staging_file(dir: &Path, path: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".graphconvert");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // umask applies, as it does for File::create
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let staged = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        staged.as_file().set_permissions(existing.permissions())?;
    }
    Ok(staged)
}

// the header holds the node count as u32.
fn node_count(nodes: usize) -> io::Result<u32> {
    u32::try_from(nodes).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} nodes do not fit the u32 node count", nodes),
        )
    })
}
