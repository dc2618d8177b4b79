//! Seal-and-verify pipeline.
//!
//! One run walks a fixed sequence of stages:
//!
//! ```text
//! Start → PlaintextReady → SaltIvGenerated → KeyDerived → Encrypted
//!       → Persisted → Reloaded → KeyRederived → Decrypted → Verified
//! ```
//!
//! Any error ends the run. A build is only successful once `Verified` is
//! reached; if sealing fails after the artifact was persisted, the store is
//! asked to discard it so an unverified pair is never left for publishing.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::crypto::{self, derive_key, require_password, validate_password, Iv, Salt};
use crate::document::PlaintextSource;
use crate::error::{Result, SiteCryptError};
use crate::store::{ArtifactStore, SealedArtifact};

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    PlaintextReady,
    SaltIvGenerated,
    KeyDerived,
    Encrypted,
    Persisted,
    Reloaded,
    KeyRederived,
    Decrypted,
    Verified,
}

impl Stage {
    /// Stages of a full build, in order.
    pub const BUILD: [Stage; 10] = [
        Stage::Start,
        Stage::PlaintextReady,
        Stage::SaltIvGenerated,
        Stage::KeyDerived,
        Stage::Encrypted,
        Stage::Persisted,
        Stage::Reloaded,
        Stage::KeyRederived,
        Stage::Decrypted,
        Stage::Verified,
    ];

    /// Stages of a verification against already persisted artifacts.
    pub const VERIFY: [Stage; 6] = [
        Stage::Start,
        Stage::PlaintextReady,
        Stage::Reloaded,
        Stage::KeyRederived,
        Stage::Decrypted,
        Stage::Verified,
    ];

    /// Stages of a plain decrypt.
    pub const OPEN: [Stage; 4] = [
        Stage::Start,
        Stage::Reloaded,
        Stage::KeyRederived,
        Stage::Decrypted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::PlaintextReady => "plaintext ready",
            Stage::SaltIvGenerated => "salt and iv generated",
            Stage::KeyDerived => "key derived",
            Stage::Encrypted => "encrypted",
            Stage::Persisted => "persisted",
            Stage::Reloaded => "reloaded",
            Stage::KeyRederived => "key re-derived",
            Stage::Decrypted => "decrypted",
            Stage::Verified => "verified",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives stage transitions as the pipeline makes them.
pub trait StageObserver {
    fn on_stage(&mut self, stage: Stage);

    /// Called once when a run fails; `reached` is the last completed stage.
    fn on_failure(&mut self, _reached: Option<Stage>, _error: &SiteCryptError) {}
}

impl<T: StageObserver + ?Sized> StageObserver for &mut T {
    fn on_stage(&mut self, stage: Stage) {
        (**self).on_stage(stage);
    }

    fn on_failure(&mut self, reached: Option<Stage>, error: &SiteCryptError) {
        (**self).on_failure(reached, error);
    }
}

/// Summary of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub plaintext_len: usize,
    pub ciphertext_len: usize,
    pub salt: Salt,
    pub iv: Iv,
    pub stages: Vec<Stage>,
}

/// Password-based seal/verify pipeline over an [`ArtifactStore`].
pub struct Pipeline<'a, S: ArtifactStore> {
    password: SecretString,
    store: S,
    observer: Option<Box<dyn StageObserver + 'a>>,
    stages: Vec<Stage>,
}

impl<'a, S: ArtifactStore> Pipeline<'a, S> {
    /// Create a pipeline for sealing new artifacts.
    ///
    /// Fails before any I/O or randomness if the password is missing or
    /// too short.
    pub fn new(password: SecretString, store: S) -> Result<Self> {
        validate_password(&password)?;
        Ok(Self::unchecked(password, store))
    }

    /// Create a pipeline for reading artifacts sealed earlier.
    ///
    /// Only requires a password to be present; the length policy applies at
    /// seal time.
    pub fn reopen(password: SecretString, store: S) -> Result<Self> {
        require_password(&password)?;
        Ok(Self::unchecked(password, store))
    }

    fn unchecked(password: SecretString, store: S) -> Self {
        Self {
            password,
            store,
            observer: None,
            stages: Vec::new(),
        }
    }

    /// Report stage transitions to `observer`.
    pub fn with_observer(mut self, observer: impl StageObserver + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Stages completed by the most recent run.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Load plaintext from `source`, then seal and verify it.
    pub fn run(&mut self, source: &dyn PlaintextSource) -> Result<BuildReport> {
        self.stages.clear();
        tracing::info!(source = %source.describe(), "sealing document");
        self.advance(Stage::Start);
        let result = source
            .plaintext()
            .and_then(|plaintext| self.seal_plaintext(&plaintext));
        self.finish_seal(result)
    }

    /// Seal and verify bytes that are already canonical.
    pub fn seal(&mut self, plaintext: &[u8]) -> Result<BuildReport> {
        self.stages.clear();
        self.advance(Stage::Start);
        let result = self.seal_plaintext(plaintext);
        self.finish_seal(result)
    }

    /// Check persisted artifacts decrypt to exactly `expected`.
    pub fn verify(&mut self, expected: &[u8]) -> Result<()> {
        self.stages.clear();
        self.advance(Stage::Start);
        self.advance(Stage::PlaintextReady);
        let result = self
            .reload_and_decrypt()
            .and_then(|decrypted| self.compare(expected, &decrypted));
        self.finish(result)
    }

    /// Reload and decrypt persisted artifacts.
    pub fn open(&mut self) -> Result<Vec<u8>> {
        self.stages.clear();
        self.advance(Stage::Start);
        let result = self.reload_and_decrypt();
        self.finish(result)
    }

    fn seal_plaintext(&mut self, plaintext: &[u8]) -> Result<BuildReport> {
        self.advance(Stage::PlaintextReady);

        let salt = Salt::generate()?;
        let iv = Iv::generate()?;
        tracing::debug!(salt = ?salt, iv = ?iv, "fresh parameters");
        self.advance(Stage::SaltIvGenerated);

        let key = derive_key(self.password.expose_secret().as_bytes(), &salt)?;
        self.advance(Stage::KeyDerived);

        let ciphertext = crypto::encrypt(&key, &iv, plaintext)?;
        drop(key);
        self.advance(Stage::Encrypted);

        let artifact = SealedArtifact {
            ciphertext,
            salt,
            iv,
        };
        self.store.write(&artifact)?;
        self.advance(Stage::Persisted);

        let decrypted = self.reload_and_decrypt()?;
        self.compare(plaintext, &decrypted)?;

        Ok(BuildReport {
            plaintext_len: plaintext.len(),
            ciphertext_len: artifact.ciphertext.len(),
            salt,
            iv,
            stages: self.stages.clone(),
        })
    }

    fn reload_and_decrypt(&mut self) -> Result<Vec<u8>> {
        let artifact = self.store.read()?;
        self.advance(Stage::Reloaded);

        let key = derive_key(self.password.expose_secret().as_bytes(), &artifact.salt)?;
        self.advance(Stage::KeyRederived);

        let decrypted = crypto::decrypt(&key, &artifact.iv, &artifact.ciphertext)?;
        self.advance(Stage::Decrypted);

        Ok(decrypted)
    }

    fn compare(&mut self, expected: &[u8], decrypted: &[u8]) -> Result<()> {
        if expected != decrypted {
            return Err(SiteCryptError::VerificationMismatch);
        }
        self.advance(Stage::Verified);
        Ok(())
    }

    fn advance(&mut self, stage: Stage) {
        tracing::debug!(stage = %stage, "pipeline stage");
        self.stages.push(stage);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_stage(stage);
        }
    }

    fn finish_seal(&mut self, result: Result<BuildReport>) -> Result<BuildReport> {
        if result.is_err() && self.stages.contains(&Stage::Persisted) {
            match self.store.discard() {
                Ok(()) => tracing::warn!("discarded unverified artifact"),
                Err(err) => tracing::warn!(error = %err, "failed to discard unverified artifact"),
            }
        }
        self.finish(result)
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            let reached = self.stages.last().copied();
            tracing::debug!(
                stage = err.stage(),
                reached = reached.map(|s| s.name()).unwrap_or("none"),
                error = %err,
                "pipeline failed"
            );
            if let Some(observer) = self.observer.as_mut() {
                observer.on_failure(reached, err);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryArtifactStore;

    const PASSWORD: &str = "correct-horse-battery";
    const PROFILE: &[u8] = br#"{"profile":{"name":"Ada","role":"Engineer"}}"#;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    struct Recorder<'r> {
        seen: &'r mut Vec<Stage>,
        failed_after: &'r mut Option<Option<Stage>>,
    }

    impl StageObserver for Recorder<'_> {
        fn on_stage(&mut self, stage: Stage) {
            self.seen.push(stage);
        }

        fn on_failure(&mut self, reached: Option<Stage>, _error: &SiteCryptError) {
            *self.failed_after = Some(reached);
        }
    }

    #[test]
    fn test_seal_walks_every_build_stage() {
        let store = MemoryArtifactStore::new();
        let mut pipeline = Pipeline::new(secret(PASSWORD), &store).unwrap();

        let report = pipeline.seal(PROFILE).unwrap();

        assert_eq!(report.stages, Stage::BUILD.to_vec());
        assert_eq!(report.plaintext_len, PROFILE.len());
        assert_eq!(report.ciphertext_len, PROFILE.len() + crypto::TAG_LENGTH);
    }

    #[test]
    fn test_observer_sees_stages_in_order() {
        let store = MemoryArtifactStore::new();
        let mut seen = Vec::new();
        let mut failed_after = None;
        {
            let mut pipeline = Pipeline::new(secret(PASSWORD), &store)
                .unwrap()
                .with_observer(Recorder {
                    seen: &mut seen,
                    failed_after: &mut failed_after,
                });
            pipeline.seal(PROFILE).unwrap();
        }
        assert_eq!(seen, Stage::BUILD.to_vec());
        assert!(failed_after.is_none());
    }

    #[test]
    fn test_missing_password_fails_before_anything() {
        let store = MemoryArtifactStore::new();
        let err = Pipeline::new(secret(""), &store).err().unwrap();
        assert!(matches!(err, SiteCryptError::MissingPassword));
        assert!(store.read().is_err());
    }

    #[test]
    fn test_reopen_allows_short_password() {
        let store = MemoryArtifactStore::new();
        assert!(Pipeline::reopen(secret("short"), &store).is_ok());
        assert!(Pipeline::new(secret("short"), &store).is_err());
    }

    #[test]
    fn test_each_build_uses_fresh_salt_and_iv() {
        let store = MemoryArtifactStore::new();
        let mut pipeline = Pipeline::new(secret(PASSWORD), &store).unwrap();

        let first = pipeline.seal(PROFILE).unwrap();
        let second = pipeline.seal(PROFILE).unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.iv, second.iv);
    }

    #[test]
    fn test_open_returns_plaintext() {
        let store = MemoryArtifactStore::new();
        Pipeline::new(secret(PASSWORD), &store)
            .unwrap()
            .seal(PROFILE)
            .unwrap();

        let mut reader = Pipeline::reopen(secret(PASSWORD), &store).unwrap();
        assert_eq!(reader.open().unwrap(), PROFILE);
        assert_eq!(reader.stages(), &Stage::OPEN);
    }

    #[test]
    fn test_verify_with_wrong_password_fails_authentication() {
        let store = MemoryArtifactStore::new();
        Pipeline::new(secret(PASSWORD), &store)
            .unwrap()
            .seal(PROFILE)
            .unwrap();

        let mut seen = Vec::new();
        let mut failed_after = None;
        let err = {
            let mut pipeline = Pipeline::reopen(secret("wrong-password"), &store)
                .unwrap()
                .with_observer(Recorder {
                    seen: &mut seen,
                    failed_after: &mut failed_after,
                });
            pipeline.verify(PROFILE).unwrap_err()
        };

        assert!(matches!(err, SiteCryptError::AuthenticationFailed));
        assert_eq!(failed_after, Some(Some(Stage::KeyRederived)));
    }

    #[test]
    fn test_verify_detects_different_plaintext() {
        let store = MemoryArtifactStore::new();
        Pipeline::new(secret(PASSWORD), &store)
            .unwrap()
            .seal(PROFILE)
            .unwrap();

        let mut pipeline = Pipeline::reopen(secret(PASSWORD), &store).unwrap();
        let err = pipeline.verify(br#"{"profile":{}}"#).unwrap_err();
        assert!(matches!(err, SiteCryptError::VerificationMismatch));
        assert_eq!(pipeline.stages().last(), Some(&Stage::Decrypted));
    }

    /// Store whose reload hands back a salt with one byte flipped.
    struct CorruptingStore {
        inner: MemoryArtifactStore,
    }

    impl ArtifactStore for CorruptingStore {
        fn write(&self, artifact: &SealedArtifact) -> Result<()> {
            self.inner.write(artifact)
        }

        fn read(&self) -> Result<SealedArtifact> {
            let mut artifact = self.inner.read()?;
            let mut salt = *artifact.salt.as_bytes();
            salt[0] ^= 0xff;
            artifact.salt = Salt::from_bytes(salt);
            Ok(artifact)
        }

        fn discard(&self) -> Result<()> {
            self.inner.discard()
        }
    }

    #[test]
    fn test_corrupted_salt_aborts_build_and_discards() {
        let store = CorruptingStore {
            inner: MemoryArtifactStore::new(),
        };
        let mut pipeline = Pipeline::new(secret(PASSWORD), &store).unwrap();

        let err = pipeline.seal(PROFILE).unwrap_err();

        assert!(matches!(err, SiteCryptError::AuthenticationFailed));
        assert!(!pipeline.stages().contains(&Stage::Verified));
        assert!(store.inner.read().is_err());
    }
}
