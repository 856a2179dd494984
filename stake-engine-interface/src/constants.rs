use crate::types::Address;

/// The identity the block prologue and the cross-chain relay act as. Only this caller may
/// trigger epoch transitions, advance the ledger clock, seed genesis and admit external events.
pub const SYSTEM_CALLER: Address = Address::from_low_u64(0xff);

/// The governance hub identity. Only this caller may adjust `StakeConfig` parameters or force a
/// validator out of the active set.
pub const GOVERNANCE: Address = Address::from_low_u64(0x1007);

/// Commission rates are expressed in basis points.
pub const COMMISSION_DENOMINATOR: u64 = 10_000;

/// `votingPowerIncreaseLimit` is a percentage of the current total voting power.
pub const VOTING_POWER_INCREASE_DENOMINATOR: u128 = 100;

/// The single status code a signature verification oracle returns on success. Any other code is
/// treated as a failed verification.
pub const VERIFICATION_SUCCESS: u8 = 1;

/// Moniker length bounds, in characters.
pub const MONIKER_MIN_LENGTH: usize = 3;
pub const MONIKER_MAX_LENGTH: usize = 9;

/// Domain prefix of the StakeCredit address derivation.
pub const STAKE_CREDIT_ADDRESS_DOMAIN: &[u8] = b"StakeCredit";
