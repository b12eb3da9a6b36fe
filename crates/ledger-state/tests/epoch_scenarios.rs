use ledger_core::{
    public_key_of, sign_payload, Amount, EcdsaVerifier, Hash32, OutPoint, PublicKey, SigningKey,
    Transaction, TxIn, TxOut,
};
use ledger_state::{is_valid_tx, EpochProcessor, TxRejection, UtxoPool};

fn key(seed: u8) -> SigningKey {
    SigningKey::from_slice(&[seed; 32]).expect("valid scalar")
}

fn out(value: i64, owner: &SigningKey) -> TxOut {
    TxOut::new(Amount::from_atoms(value), public_key_of(owner))
}

/// Build a tx spending `spends`, each input signed by its paired key.
fn signed_tx(spends: &[(OutPoint, &SigningKey)], outputs: Vec<TxOut>) -> Transaction {
    let inputs = spends.iter().map(|(op, _)| TxIn::unsigned(*op)).collect();
    let mut tx = Transaction::new(inputs, outputs).expect("tx");
    for (i, (_, sk)) in spends.iter().enumerate() {
        let payload = tx.signing_payload(i).expect("payload");
        tx = tx.with_signature(i, sign_payload(sk, &payload)).expect("sign");
    }
    tx
}

fn h0() -> OutPoint {
    OutPoint::new(Hash32([0xa0; 32]), 0)
}

/// `{ (H0, 0): Output(10, K1) }`
fn seed_pool(k1: &SigningKey) -> UtxoPool {
    [(h0(), out(10, k1))].into_iter().collect()
}

#[test]
fn funded_spend_moves_value_to_new_owner() {
    let (k1, k2) = (key(1), key(2));
    let pool = seed_pool(&k1);
    let t1 = signed_tx(&[(h0(), &k1)], vec![out(4, &k2)]);

    assert!(is_valid_tx(&t1, &pool, &EcdsaVerifier));

    let mut processor = EpochProcessor::new(&pool);
    let accepted = processor.apply_epoch(&[t1.clone()]);
    assert_eq!(accepted, vec![t1.clone()]);

    let expected: UtxoPool = [(t1.outpoint(0), out(4, &k2))].into_iter().collect();
    assert_eq!(processor.pool(), &expected);
    assert!(!processor.pool().contains(&h0()));
    // Caller's snapshot is untouched.
    assert!(pool.contains(&h0()));
}

#[test]
fn overspend_is_invalid() {
    let (k1, k2) = (key(1), key(2));
    let pool = seed_pool(&k1);
    let t2 = signed_tx(&[(h0(), &k1)], vec![out(15, &k2)]);
    assert!(!is_valid_tx(&t2, &pool, &EcdsaVerifier));

    let mut processor = EpochProcessor::new(&pool);
    assert!(processor.apply_epoch(&[t2]).is_empty());
    assert_eq!(processor.pool(), &pool);
}

#[test]
fn signature_by_non_owner_is_invalid() {
    let (k1, k2) = (key(1), key(2));
    let pool = seed_pool(&k1);
    let forged = signed_tx(&[(h0(), &k2)], vec![out(1, &k2)]);
    let processor = EpochProcessor::new(&pool);
    assert_eq!(
        processor.validate_tx(&forged),
        Err(TxRejection::BadSignature { input: 0 })
    );
}

#[test]
fn signature_does_not_carry_over_to_altered_outputs() {
    let (k1, k2, thief) = (key(1), key(2), key(3));
    let pool = seed_pool(&k1);
    let honest = signed_tx(&[(h0(), &k1)], vec![out(4, &k2)]);

    // Same signed input, redirected output.
    let tampered = Transaction::new(honest.inputs().to_vec(), vec![out(4, &thief)]).expect("tx");
    assert!(is_valid_tx(&honest, &pool, &EcdsaVerifier));
    assert!(!is_valid_tx(&tampered, &pool, &EcdsaVerifier));
}

#[test]
fn one_bad_signature_sinks_the_whole_tx() {
    let (k1, k2) = (key(1), key(2));
    let second = OutPoint::new(Hash32([0xa0; 32]), 1);
    let mut pool = seed_pool(&k1);
    pool.insert(second, out(5, &k1));

    let tx = signed_tx(&[(h0(), &k1), (second, &k2)], vec![out(1, &k2)]);
    assert!(!is_valid_tx(&tx, &pool, &EcdsaVerifier));
}

#[test]
fn duplicate_input_is_rejected_even_if_unspent() {
    let (k1, k2) = (key(1), key(2));
    let pool = seed_pool(&k1);
    let tx = signed_tx(&[(h0(), &k1), (h0(), &k1)], vec![out(1, &k2)]);
    let processor = EpochProcessor::new(&pool);
    assert_eq!(
        processor.validate_tx(&tx),
        Err(TxRejection::InternalDoubleSpend {
            input: 1,
            outpoint: h0()
        })
    );
}

#[test]
fn first_of_two_conflicting_spends_wins() {
    let (k1, k2, k3) = (key(1), key(2), key(3));
    let pool = seed_pool(&k1);
    let a = signed_tx(&[(h0(), &k1)], vec![out(9, &k2)]);
    let b = signed_tx(&[(h0(), &k1)], vec![out(8, &k3)]);

    let mut ab = EpochProcessor::new(&pool);
    assert_eq!(ab.apply_epoch(&[a.clone(), b.clone()]), vec![a.clone()]);
    assert!(ab.pool().contains(&a.outpoint(0)));
    assert!(!ab.pool().contains(&b.outpoint(0)));

    let mut ba = EpochProcessor::new(&pool);
    assert_eq!(ba.apply_epoch(&[b.clone(), a.clone()]), vec![b.clone()]);
    assert!(ba.pool().contains(&b.outpoint(0)));
    assert!(!ba.pool().contains(&a.outpoint(0)));
}

#[test]
fn chained_spend_within_one_epoch() {
    let (k1, k2, k3) = (key(1), key(2), key(3));
    let pool = seed_pool(&k1);
    let a = signed_tx(&[(h0(), &k1)], vec![out(6, &k2), out(4, &k1)]);
    let b = signed_tx(&[(a.outpoint(0), &k2)], vec![out(5, &k3)]);

    let mut processor = EpochProcessor::new(&pool);
    assert_eq!(processor.apply_epoch(&[a.clone(), b.clone()]), vec![a.clone(), b.clone()]);

    let expected: UtxoPool = [(a.outpoint(1), out(4, &k1)), (b.outpoint(0), out(5, &k3))]
        .into_iter()
        .collect();
    assert_eq!(processor.pool(), &expected);
}

#[test]
fn child_before_parent_is_not_reconsidered() {
    let (k1, k2, k3) = (key(1), key(2), key(3));
    let pool = seed_pool(&k1);
    let a = signed_tx(&[(h0(), &k1)], vec![out(6, &k2)]);
    let b = signed_tx(&[(a.outpoint(0), &k2)], vec![out(5, &k3)]);

    let mut processor = EpochProcessor::new(&pool);
    assert_eq!(processor.apply_epoch(&[b.clone(), a.clone()]), vec![a.clone()]);

    // The child becomes valid in the next epoch.
    assert_eq!(processor.apply_epoch(&[b.clone()]), vec![b]);
    assert_eq!(processor.epoch(), 2);
}

#[test]
fn state_persists_across_epochs() {
    let (k1, k2) = (key(1), key(2));
    let pool = seed_pool(&k1);
    let a = signed_tx(&[(h0(), &k1)], vec![out(10, &k2)]);
    let replay = signed_tx(&[(h0(), &k1)], vec![out(1, &k2)]);

    let mut processor = EpochProcessor::new(&pool);
    assert_eq!(processor.apply_epoch(&[a]).len(), 1);
    assert!(processor.apply_epoch(&[replay]).is_empty());
}

#[test]
fn rejection_does_not_stop_the_batch() {
    let (k1, k2) = (key(1), key(2));
    let pool = seed_pool(&k1);
    let unknown = signed_tx(
        &[(OutPoint::new(Hash32([0xee; 32]), 0), &k1)],
        vec![out(1, &k2)],
    );
    let good = signed_tx(&[(h0(), &k1)], vec![out(10, &k2)]);

    let mut processor = EpochProcessor::new(&pool);
    let report = processor.apply_epoch_report(&[unknown, good.clone()]);
    assert_eq!(report.accepted, vec![good]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.fees, Amount::zero());
}

#[test]
fn garbage_owner_key_is_a_rejection_not_a_panic() {
    let k1 = key(1);
    let pool: UtxoPool = [(h0(), TxOut::new(Amount::from_atoms(3), PublicKey(vec![0u8; 5])))]
        .into_iter()
        .collect();
    let tx = signed_tx(&[(h0(), &k1)], vec![]);
    assert!(!is_valid_tx(&tx, &pool, &EcdsaVerifier));
}
