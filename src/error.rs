use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Bank request error: {0}")]
    BankRequestError(#[from] reqwest::Error),
    #[error("Bank response error: {0}")]
    BankResponseError(String),
}
