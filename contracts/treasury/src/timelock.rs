//! Timelock bookkeeping: transaction hashing, call payloads and the queue.
//!
//! A queued transaction is identified by
//! `keccak256(target || value || signature || data || eta || fund_type)`
//! and maps to its eta. Executing it removes the entry, so a hash with no
//! entry is either never queued or already spent.

use common::ttl::set_persistent;
use soroban_sdk::{symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env, String, Symbol};

const QUEUED: Symbol = symbol_short!("QUEUED");

/// Window after the eta during which a queued transaction stays executable.
pub const GRACE_PERIOD: u64 = 14 * 86_400;

fn queued_key(tx_hash: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (QUEUED, tx_hash.clone())
}

/// Deterministic identifier of a timelocked transaction.
pub fn tx_hash(
    env: &Env,
    target: &Address,
    value: i128,
    signature: &String,
    data: &Bytes,
    eta: u64,
    fund_type: &String,
) -> BytesN<32> {
    let mut buf = Bytes::new(env);
    buf.append(&target.clone().to_xdr(env));
    buf.extend_from_slice(&value.to_be_bytes());
    buf.append(&signature.clone().to_xdr(env));
    buf.append(&data.clone().to_xdr(env));
    buf.extend_from_slice(&eta.to_be_bytes());
    buf.append(&fund_type.clone().to_xdr(env));
    env.crypto().keccak256(&buf).into()
}

/// Build the bytes handed to the target.
///
/// Without a signature the calldata is passed through untouched; with one,
/// the first four bytes of `keccak256(signature)` are prepended.
pub fn call_payload(env: &Env, signature: &String, data: &Bytes) -> Bytes {
    if signature.len() == 0 {
        return data.clone();
    }
    let digest: BytesN<32> = env.crypto().keccak256(&signature.to_bytes()).into();
    let mut payload = Bytes::from_slice(env, &digest.to_array()[..4]);
    payload.append(data);
    payload
}

pub(crate) fn queued_eta(env: &Env, tx_hash: &BytesN<32>) -> Option<u64> {
    env.storage().persistent().get(&queued_key(tx_hash))
}

pub(crate) fn set_queued(env: &Env, tx_hash: &BytesN<32>, eta: u64) {
    set_persistent(env, &queued_key(tx_hash), &eta);
}

pub(crate) fn clear_queued(env: &Env, tx_hash: &BytesN<32>) {
    env.storage().persistent().remove(&queued_key(tx_hash));
}
