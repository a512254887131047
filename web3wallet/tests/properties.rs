//! Property tests for seeds, paths and the account registry

use proptest::prelude::*;

use web3wallet::account::address::decode_address;
use web3wallet::crypto::keys::*;
use web3wallet::crypto::seed::{mnemonic_to_seed, Seed};
use web3wallet::{AccountRegistry, Error};

fn chain_strategy() -> impl Strategy<Value = ChainKind> {
    prop_oneof![Just(ChainKind::Ethereum), Just(ChainKind::Solana)]
}

fn phrase_strategy() -> impl Strategy<Value = String> {
    prop::array::uniform16(any::<u8>())
        .prop_map(|entropy| bip39::Mnemonic::from_entropy(&entropy).unwrap().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn derivation_is_deterministic(phrase in phrase_strategy(), chain in chain_strategy(), index in 0u64..64) {
        let first = mnemonic_to_seed(&phrase, None).unwrap();
        let second = mnemonic_to_seed(&phrase, None).unwrap();
        prop_assert_eq!(&first, &second);

        let path = build_path(chain, index).unwrap();
        let a = derive(&first, &path, chain).unwrap();
        let b = derive(&second, &path, chain).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn built_paths_have_chain_shape(chain in chain_strategy(), index in 0u64..=MAX_ACCOUNT_INDEX) {
        let path = build_path(chain, index).unwrap();
        let segments = path.segments();

        prop_assert_eq!(segments[0], ChildIndex::hardened(44).unwrap());
        prop_assert_eq!(segments[1], ChildIndex::hardened(chain.coin_type()).unwrap());
        prop_assert_eq!(path.account_index(), Some(index as u32));
        match chain {
            ChainKind::Ethereum => {
                prop_assert_eq!(path.len(), 5);
                prop_assert!(!segments[3].is_hardened() && !segments[4].is_hardened());
            }
            ChainKind::Solana => {
                prop_assert_eq!(path.len(), 4);
                prop_assert!(path.is_all_hardened());
            }
        }

        let reparsed: DerivationPath = path.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn out_of_range_index_is_rejected(chain in chain_strategy(), index in (MAX_ACCOUNT_INDEX + 1)..=u64::from(u32::MAX) * 2) {
        prop_assert!(matches!(build_path(chain, index), Err(Error::InvalidIndex(i)) if i == index));
    }

    #[test]
    fn solana_address_decodes_to_public_key(bytes in prop::collection::vec(any::<u8>(), 64), index in 0u64..16) {
        let seed = Seed::from_slice(&bytes).unwrap();
        let path = build_path(ChainKind::Solana, index).unwrap();

        let key_pair = derive_key_pair(&seed, ChainKind::Solana, &path).unwrap();
        let account = derive(&seed, &path, ChainKind::Solana).unwrap();

        let decoded = decode_address(account.public_key(), ChainKind::Solana).unwrap();
        prop_assert_eq!(decoded.as_slice(), key_pair.public_key().as_bytes());
    }

    #[test]
    fn registry_indices_are_gap_free(bytes in prop::collection::vec(any::<u8>(), 64), chain in chain_strategy(), count in 1usize..6) {
        let seed = Seed::from_slice(&bytes).unwrap();
        let mut registry = AccountRegistry::new(chain);

        for _ in 0..count {
            registry.next_account(&seed).unwrap();
        }

        let indices: Vec<u32> = registry.accounts().iter().map(|a| a.index()).collect();
        prop_assert_eq!(indices, (0..count as u32).collect::<Vec<_>>());
        prop_assert_eq!(registry.next_index(), count as u32);
    }
}
