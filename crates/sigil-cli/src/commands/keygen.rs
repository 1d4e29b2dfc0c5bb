use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sigil_token::key::generate_rsa_pem;

/// Paths written by [`keygen`].
#[derive(Debug)]
pub struct KeyFiles {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
}

/// Generates an RSA key pair into `out_dir` as `private.pem` and `public.pem`.
///
/// Existing files are left alone unless `force` is set.
pub fn keygen(out_dir: &Path, bits: usize, force: bool) -> Result<KeyFiles> {
    let files = KeyFiles {
        private_key: out_dir.join("private.pem"),
        public_key: out_dir.join("public.pem"),
    };

    if !force {
        for path in [&files.private_key, &files.public_key] {
            if path.exists() {
                bail!(
                    "{} already exists (pass --force to overwrite)",
                    path.display()
                );
            }
        }
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let pair = generate_rsa_pem(bits).context("Failed to generate RSA key pair")?;
    write_private(&files.private_key, pair.private_pem.as_bytes())?;
    fs::write(&files.public_key, pair.public_pem)
        .with_context(|| format!("Failed to write {}", files.public_key.display()))?;

    tracing::info!(
        bits,
        private_key = %files.private_key.display(),
        public_key = %files.public_key.display(),
        "generated RSA key pair"
    );
    Ok(files)
}

fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
