pub mod account;
pub mod client;
pub mod constants;
pub mod transport;

#[cfg(not(tarpaulin_include))]
pub fn get_client() -> Result<client::AccountsRestClient, client::error::ClientError> {
    client::AccountsRestClient::new(constants::DEFAULT_API_HOST)
}
