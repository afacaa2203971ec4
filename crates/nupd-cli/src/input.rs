use std::{
    fs,
    io::Read,
    path::Path,
};

use nupd_manifest::{FieldWarning, UpdateManifest};
use tracing::debug;

use crate::error::{CliResult, ErrorContext};

/// Reads manifest bytes from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .with_context(|| "reading manifest from stdin".into())?;
        debug!("read {} bytes from stdin", buffer.len());
        return Ok(buffer);
    }

    let content =
        fs::read(path).with_context(|| format!("reading manifest {}", path.display()))?;
    debug!("read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

pub fn load_manifest(path: &Path) -> CliResult<UpdateManifest> {
    let content = read_input(path)?;
    Ok(UpdateManifest::from_bytes(&content)?)
}

pub fn load_manifest_with_warnings(
    path: &Path,
) -> CliResult<(UpdateManifest, Vec<FieldWarning>)> {
    let content = read_input(path)?;
    Ok(UpdateManifest::from_bytes_with_warnings(&content)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use nupd_manifest::ManifestError;

    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_load_manifest_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[HOSTS]\nOther=10@http://a/\n[ENGINE0]\nsize=12\n")
            .unwrap();

        let manifest = load_manifest(file.path()).unwrap();
        assert_eq!(manifest.hosts.regular, vec!["10@http://a/"]);
        assert_eq!(manifest.component("ENGINE0").unwrap().size, 12);
    }

    #[test]
    fn test_load_manifest_with_warnings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[ENGINE0]\nsize=twelve\n").unwrap();

        let (manifest, warnings) =
            load_manifest_with_warnings(file.path()).unwrap();
        assert_eq!(manifest.component("ENGINE0").unwrap().size, 0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(&dir.path().join("update.ver")).unwrap_err();
        assert!(matches!(err, CliError::IoError { .. }));
        assert!(err.to_string().starts_with("Error while reading manifest"));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[HOSTS").unwrap();

        let err = load_manifest(file.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Manifest(ManifestError::MalformedDocument { .. })
        ));
    }
}
