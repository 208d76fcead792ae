use crate::client::TranslationsClient;
use crate::error::ClientResult;
use crate::phrase::{Phrase, Translation};

/// A translator bound to one language and context.
///
/// Created with [`TranslationsClient::bind`].
pub struct BoundTranslator<'a> {
    client: &'a mut TranslationsClient,
    language: String,
    context: Option<String>,
}

impl<'a> BoundTranslator<'a> {
    pub(crate) fn new(
        client: &'a mut TranslationsClient,
        language: &str,
        context: Option<&str>,
    ) -> Self {
        Self {
            client,
            language: language.to_string(),
            context: context.map(str::to_string),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub async fn get<I, P>(&mut self, phrases: I) -> ClientResult<Translation>
    where
        I: IntoIterator<Item = P>,
        P: Into<Phrase>,
    {
        self.client
            .get(&self.language, self.context.as_deref(), phrases)
            .await
    }
}
