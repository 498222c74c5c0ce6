//! Multiplexing resolver over several command families.

use crate::basic_nfc::BasicNfcResolver;
use crate::family::{Command, FamilyResolver, Response};
use crate::message::TcmpMessage;
use crate::system::SystemResolver;
use tappy_core::{Error, Result};
use tracing::trace;

/// Routes messages to the first resolver that claims their family.
pub struct ResolverMux {
    resolvers: Vec<Box<dyn FamilyResolver>>,
}

impl ResolverMux {
    pub fn new(resolvers: Vec<Box<dyn FamilyResolver>>) -> Self {
        Self { resolvers }
    }

    /// Basic NFC and system families.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(BasicNfcResolver), Box::new(SystemResolver)])
    }

    /// Register an additional family resolver.
    pub fn push(&mut self, resolver: Box<dyn FamilyResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn find(&self, message: &TcmpMessage) -> Option<&dyn FamilyResolver> {
        self.resolvers
            .iter()
            .find(|resolver| resolver.check_family(message))
            .map(|resolver| &**resolver)
    }

    /// Whether any registered resolver handles the message's family.
    pub fn check_family(&self, message: &TcmpMessage) -> bool {
        self.find(message).is_some()
    }

    /// # Errors
    ///
    /// [`Error::UnsupportedCommand`] if no resolver claims the family,
    /// otherwise whatever the matching resolver returns.
    pub fn resolve_command(&self, message: &TcmpMessage) -> Result<Command> {
        match self.find(message) {
            Some(resolver) => resolver.resolve_command(message),
            None => {
                trace!(family = %message.command_family(), "No resolver for command");
                Err(Error::UnsupportedCommand)
            }
        }
    }

    /// # Errors
    ///
    /// [`Error::UnsupportedResponse`] if no resolver claims the family,
    /// otherwise whatever the matching resolver returns.
    pub fn resolve_response(&self, message: &TcmpMessage) -> Result<Response> {
        match self.find(message) {
            Some(resolver) => resolver.resolve_response(message),
            None => {
                trace!(family = %message.command_family(), "No resolver for response");
                Err(Error::UnsupportedResponse)
            }
        }
    }
}

impl Default for ResolverMux {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ResolverMux {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let families: Vec<String> = self
            .resolvers
            .iter()
            .map(|r| r.family().to_string())
            .collect();
        f.debug_struct("ResolverMux")
            .field("families", &families)
            .finish()
    }
}
