#![no_main]

use arbitrary::Arbitrary;
use canonpack::{decode, encode, record, Error};
use libfuzzer_sys::fuzz_target;

record! {
    #[derive(Arbitrary, Debug, Clone, PartialEq, Default)]
    pub struct Entry {
        uint "seq" => pub seq: u64,
        bytes "body" max 256 => pub body: Vec<u8>,
    }
}

record! {
    #[derive(Arbitrary, Debug, Clone, PartialEq, Default)]
    pub struct Message {
        record "head" => pub head: Entry,
        records "entries" max 8 => pub entries: Vec<Entry>,
        text "topic" max 64 => pub topic: String,
        fixed "tag" max 16 => pub tag: [u8; 16],
    }
}

/// Whether every variable-length field is within its declared maximum.
fn fits(message: &Message) -> bool {
    message.head.body.len() <= 256
        && message.topic.len() <= 64
        && message.entries.len() <= 8
        && message.entries.iter().all(|entry| entry.body.len() <= 256)
}

#[derive(Arbitrary, Debug)]
enum Input {
    Raw(Vec<u8>),
    Value(Message),
}

fuzz_target!(|input: Input| {
    match input {
        Input::Raw(data) => {
            // Decoding adversarial bytes must never panic the host.
            let _: Result<Message, Error> = decode(&data[..]);
        }
        Input::Value(message) => {
            let encoded = encode(&message).expect("encode failed");
            let decoded: Result<Message, Error> = decode(&encoded[..]);
            if fits(&message) {
                assert_eq!(message, decoded.expect("decode of encoded message failed"));
            } else {
                // Oversized fields encode, then fail closed on decode.
                assert!(decoded.is_err());
            }
        }
    }
});
