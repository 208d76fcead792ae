//! Translation client.
//!
//! `TranslationsClient::get` decides per call between skipping translation,
//! answering from the cache and asking the translation server:
//!
//! ```ignore
//! let mut client = TranslationsClient::builder("127.0.0.1", 5555)
//!     .translation_cache(Arc::new(MemoryTranslationCache::with_ttl(Duration::from_secs(300))))
//!     .build();
//!
//! let one = client.get("se", None, ["I have many"]).await?;
//! let two = client.get("se", None, [("I have many", 1), ("translations", 1)]).await?;
//! ```

mod bound;
mod connection;


use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, TranslationCache, build_cache};
use crate::config::settings::{ClientSettings, ServerConfig};
use crate::error::{ClientError, ClientResult};
use crate::phrase::{Phrase, Translation};
use crate::protocol::TranslationRequest;

pub use bound::BoundTranslator;
use connection::Connection;

/// Shortest request or connect timeout a client will use.
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Builder for [`TranslationsClient`].
pub struct TranslationsClientBuilder {
    address: String,
    timeout: Duration,
    connect_timeout: Duration,
    skip_translations: bool,
    translation_cache: Option<Arc<dyn TranslationCache>>,
}

impl TranslationsClientBuilder {
    /// Request timeout covering send and receive, at least 1 ms
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    /// Connect timeout, at least 1 ms
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    /// Return phrases untranslated without touching network or cache
    pub fn skip_translations(mut self, skip: bool) -> Self {
        self.skip_translations = skip;
        self
    }

    pub fn translation_cache(mut self, cache: Arc<dyn TranslationCache>) -> Self {
        self.translation_cache = Some(cache);
        self
    }

    pub fn build(self) -> TranslationsClient {
        TranslationsClient {
            address: self.address,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            skip_translations: self.skip_translations,
            translation_cache: self.translation_cache,
            connection: None,
            closed: false,
        }
    }
}

/// Client for the translation server.
///
/// One client owns one connection and serves one caller at a time. The
/// connection is opened on the first call that needs the server and is
/// reopened after a transport failure.
pub struct TranslationsClient {
    address: String,
    timeout: Duration,
    connect_timeout: Duration,
    skip_translations: bool,
    translation_cache: Option<Arc<dyn TranslationCache>>,
    connection: Option<Connection>,
    closed: bool,
}

impl TranslationsClient {
    pub fn builder<S: Into<String>>(host: S, port: u16) -> TranslationsClientBuilder {
        Self::builder_for(&ServerConfig {
            host: host.into(),
            port,
            ..ServerConfig::default()
        })
    }

    fn builder_for(server: &ServerConfig) -> TranslationsClientBuilder {
        TranslationsClientBuilder {
            address: server.address(),
            timeout: MIN_TIMEOUT,
            connect_timeout: MIN_TIMEOUT,
            skip_translations: false,
            translation_cache: None,
        }
        .timeout(server.timeout())
        .connect_timeout(server.connect_timeout())
    }

    /// Build a client and its configured cache from loaded settings.
    pub async fn from_settings(settings: &ClientSettings) -> ClientResult<Self> {
        settings.validate()?;

        let mut builder =
            Self::builder_for(&settings.server).skip_translations(settings.skip_translations);
        if !settings.skip_translations {
            if let Some(cache) = build_cache(&settings.cache).await? {
                builder = builder.translation_cache(cache);
            }
        }
        Ok(builder.build())
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn skips_translations(&self) -> bool {
        self.skip_translations
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Translate `phrases` into `language`.
    ///
    /// One phrase yields [`Translation::Single`], several yield
    /// [`Translation::Many`] in request order. Cached translations are used
    /// where present; the rest are fetched in one request and cached. Either
    /// every phrase is resolved or the call fails.
    pub async fn get<I, P>(
        &mut self,
        language: &str,
        context: Option<&str>,
        phrases: I,
    ) -> ClientResult<Translation>
    where
        I: IntoIterator<Item = P>,
        P: Into<Phrase>,
    {
        let phrases = collect_phrases(phrases)?;

        // Skip mode never touches the connection, so it works after close().
        if self.skip_translations {
            return Ok(Translation::from_values(
                phrases.into_iter().map(|phrase| phrase.text).collect(),
            ));
        }
        self.ensure_open()?;
        validate_language(language)?;

        let Some(cache) = self.translation_cache.clone() else {
            return self.fetch_phrases(language, context, phrases).await;
        };

        let keys: Vec<CacheKey> = phrases
            .iter()
            .map(|phrase| CacheKey::new(language, context, phrase))
            .collect();
        let cached = match cache.get_multiple(&keys).await {
            Ok(values) if values.len() == keys.len() => values,
            Ok(values) => {
                tracing::warn!(
                    expected = keys.len(),
                    returned = values.len(),
                    "Translation cache returned a misaligned lookup, treating as miss"
                );
                vec![None; keys.len()]
            }
            Err(e) => {
                tracing::warn!(error = %e, "Translation cache lookup failed, treating as miss");
                vec![None; keys.len()]
            }
        };

        let missing: Vec<usize> = cached
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.is_none().then_some(idx))
            .collect();
        tracing::debug!(
            language,
            requested = phrases.len(),
            cache_hits = phrases.len() - missing.len(),
            "Translation cache consulted"
        );

        if missing.is_empty() {
            return Ok(Translation::from_values(cached.into_iter().flatten().collect()));
        }

        let missing_phrases: Vec<Phrase> =
            missing.iter().map(|&idx| phrases[idx].clone()).collect();
        let fetched = self.fetch_phrases(language, context, missing_phrases).await?.into_vec();

        let entries: Vec<(CacheKey, String)> = missing
            .iter()
            .zip(&fetched)
            .map(|(&idx, value)| (keys[idx].clone(), value.clone()))
            .collect();
        if let Err(e) = cache.set_multiple(entries).await {
            tracing::warn!(error = %e, "Failed to store translations in cache");
        }

        let mut values = cached;
        for (idx, value) in missing.into_iter().zip(fetched) {
            values[idx] = Some(value);
        }
        Ok(Translation::from_values(values.into_iter().flatten().collect()))
    }

    /// Ask the translation server directly, ignoring skip mode and cache.
    pub async fn fetch<I, P>(
        &mut self,
        language: &str,
        context: Option<&str>,
        phrases: I,
    ) -> ClientResult<Translation>
    where
        I: IntoIterator<Item = P>,
        P: Into<Phrase>,
    {
        let phrases = collect_phrases(phrases)?;
        self.ensure_open()?;
        validate_language(language)?;
        self.fetch_phrases(language, context, phrases).await
    }

    /// A translator with `language` and `context` fixed.
    pub fn bind<'a>(&'a mut self, language: &str, context: Option<&str>) -> BoundTranslator<'a> {
        BoundTranslator::new(self, language, context)
    }

    /// Drop the connection. Later calls that need the server fail with
    /// [`ClientError::Closed`]; skip mode keeps answering.
    pub fn close(&mut self) {
        if !self.closed {
            self.connection = None;
            self.closed = true;
            tracing::debug!(address = %self.address, "Translation client closed");
        }
    }

    async fn fetch_phrases(
        &mut self,
        language: &str,
        context: Option<&str>,
        phrases: Vec<Phrase>,
    ) -> ClientResult<Translation> {
        let request = TranslationRequest::new(language, context, phrases);
        let timeout = self.timeout;

        let connection = match self.connection {
            Some(ref mut connection) => connection,
            None => self
                .connection
                .insert(Connection::open(&self.address, self.connect_timeout).await?),
        };

        match connection.round_trip(&request, timeout).await {
            Ok(translations) => Ok(Translation::from_values(translations)),
            Err(e) => {
                if e.is_connection_fatal() {
                    tracing::warn!(
                        address = %self.address,
                        error = %e,
                        "Dropping connection to translation server"
                    );
                    self.connection = None;
                }
                Err(e)
            }
        }
    }

    fn ensure_open(&self) -> ClientResult<()> {
        if self.closed {
            return Err(ClientError::Closed);
        }
        Ok(())
    }
}

fn collect_phrases<I, P>(phrases: I) -> ClientResult<Vec<Phrase>>
where
    I: IntoIterator<Item = P>,
    P: Into<Phrase>,
{
    let phrases: Vec<Phrase> = phrases.into_iter().map(Into::into).collect();
    if phrases.is_empty() {
        return Err(ClientError::invalid_input("No phrases to translate"));
    }
    Ok(phrases)
}

fn validate_language(language: &str) -> ClientResult<()> {
    if language.trim().is_empty() {
        return Err(ClientError::invalid_input("Language must not be empty"));
    }
    Ok(())
}
