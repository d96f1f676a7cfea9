use async_graphql::Enum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Enum)]
#[graphql(remote = "chainql_contracts::CallFailure")]
/// Describes why a contract call did not return a value.
pub enum CallFailure {
    UnknownMethod,
    InvalidArguments,
    UnknownNetwork,
    Transport,
    Reverted,
    EmptyResult,
    Decode,
}
