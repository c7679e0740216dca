//! MD-X2500 marker
//!
//! Named operations for the MD-X2500 series on top of the base client.

use std::time::Duration;

use crate::client::Client;
use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::protocol::Response;

use super::commands;

/// MD-X2500 controller handle
#[derive(Default)]
pub struct Mdx2500 {
    /// Base protocol client
    client: Client,

    /// Last program the controller accepted through [`Mdx2500::change_program`]
    current_program: Option<String>,
}

impl Mdx2500 {
    pub fn new(config: ConnectionConfig) -> Self {
        Self::from_client(Client::new(config))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            current_program: None,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Raw access for commands outside this vocabulary
    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    pub fn into_client(self) -> Client {
        self.client
    }

    // =========================================================================
    // Connection
    // =========================================================================

    pub fn connect(&mut self, address: &str) -> Result<()> {
        self.client.connect(address)
    }

    pub fn disconnect(&mut self) {
        self.client.disconnect();
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    pub fn is_ready(&mut self) -> Response {
        self.client.run(&commands::ready())
    }

    pub fn clear_error(&mut self) -> Response {
        self.client.run(&commands::error_clear())
    }

    pub fn error_status(&mut self) -> Response {
        self.client.run(&commands::error_status())
    }

    /// Start marking; pass a timeout when the job outlasts the default receive timeout
    pub fn start_marking(&mut self, receive_timeout: Option<Duration>) -> Response {
        self.client.run_with(&commands::start_marking(), receive_timeout)
    }

    pub fn stop_marking(&mut self) -> Response {
        self.client.run(&commands::stop_marking())
    }

    /// Select a program; remembered only if the controller acknowledges it
    pub fn change_program(&mut self, program: &str) -> Response {
        let response = self.client.run(&commands::program_no(program));
        if response.success() {
            self.current_program = Some(program.to_string());
        }
        response
    }

    /// Replace the text of several blocks in one linked write
    ///
    /// Fails before any network activity when the slices are empty or differ in length.
    pub fn change_character_strings<S: AsRef<str>>(
        &mut self,
        blocks: &[u32],
        strings: &[S],
    ) -> Result<Response> {
        let command = commands::character_strings(blocks, strings)?;
        Ok(self.client.run(&command))
    }

    /// Program id last accepted by the controller, if any
    pub fn current_program(&self) -> Option<&str> {
        self.current_program.as_deref()
    }
}
