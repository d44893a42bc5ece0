use crate::{
    ApplicationCallTransactionBuilder, OnApplicationComplete, StateSchema,
    test_utils::{AddressMother, TransactionHeaderMother},
};
use base64::{Engine, prelude::BASE64_STANDARD};

pub struct ApplicationCallTransactionMother {}

impl ApplicationCallTransactionMother {
    pub fn application_call() -> ApplicationCallTransactionBuilder {
        // https://lora.algokit.io/testnet/transaction/6Y644M5SGTKNBH7ZX6D7QAAHDF6YL6FDJPRAGSUHNZLR4IKGVSPQ
        ApplicationCallTransactionBuilder::default()
            .header(
                TransactionHeaderMother::testnet()
                    .sender(
                        "KVAGZI3WJI36TTTKJUI36ECGP3NHGR5VBJNIXG3DROHPGH2XFC36D4HENE"
                            .parse()
                            .unwrap(),
                    )
                    .first_valid(21038300)
                    .last_valid(21039300)
                    .note(BASE64_STANDARD.decode("AAAAAAAPQkA=").unwrap())
                    .fee(5000)
                    .group(
                        BASE64_STANDARD
                            .decode("ktxBY/2UFfqvhwKKxwihS9YhfG+of3hz2I3ErgNZZSo=")
                            .unwrap()
                            .try_into()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .app_id(84366825)
            .on_complete(OnApplicationComplete::NoOp)
            .args(vec![
                BASE64_STANDARD.decode("bWludA==").unwrap(),
                BASE64_STANDARD.decode("AAAAAAAPQkA=").unwrap(),
                BASE64_STANDARD.decode("c2VjdXJpdGl6ZS5hbGdv").unwrap(),
                BASE64_STANDARD
                    .decode("dGVtcGxhdGUtaXBmczovL3tpcGZzY2lkOjE6ZGFnLXBiOnJlc2VydmU6c2hhMi0yNTZ9L25mZC5qc29u")
                    .unwrap(),
            ])
            .account_references(vec![
                "KVAGZI3WJI36TTTKJUI36ECGP3NHGR5VBJNIXG3DROHPGH2XFC36D4HENE"
                    .parse()
                    .unwrap(),
                "KVAGZI3WJI36TTTKJUI36ECGP3NHGR5VBJNIXG3DROHPGH2XFC36D4HENE"
                    .parse()
                    .unwrap(),
            ])
            .asset_references(vec![84366776])
            .to_owned()
    }

    /// Creation of the hello world contract: one uint and two byte slices of global state.
    pub fn hello_world_create() -> ApplicationCallTransactionBuilder {
        ApplicationCallTransactionBuilder::default()
            .header(
                TransactionHeaderMother::localnet()
                    .sender(AddressMother::address())
                    .first_valid(12)
                    .last_valid(1012)
                    .build()
                    .unwrap(),
            )
            .app_id(0)
            // `#pragma version 5; int 1; return` assembled
            .approval_program(vec![0x05, 0x81, 0x01, 0x43])
            .clear_state_program(vec![0x05, 0x81, 0x01, 0x43])
            .global_state_schema(StateSchema {
                num_uints: 1,
                num_byte_slices: 2,
            })
            .to_owned()
    }
}
