// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{anyhow, bail};
use formbind_core::codec::text::TextCodec;
use formbind_core::decoder::Decoder;
use formbind_core::encoder::{EncodeOptions, Encoder, TypedValue};
use formbind_core::error::{BoxError, Error};
use formbind_core::values::values_from_pairs;
use formbind_core::{impl_form_custom, impl_form_text};
use formbind_derive::FormObject;

/// Amount in cents, bound only through registered functions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money(i64);

impl_form_custom!(Money);

fn money_decoder() -> Decoder {
    let mut decoder = Decoder::default();
    decoder.register_func(|text: &str| -> anyhow::Result<Money> {
        let (units, cents) = text.split_once('.').ok_or_else(|| anyhow!("missing cents in '{text}'"))?;
        Ok(Money(units.parse::<i64>()? * 100 + cents.parse::<i64>()?))
    });
    decoder
}

fn money_encoder() -> Encoder {
    let mut encoder = Encoder::default();
    encoder.register_func(|m: &Money| -> anyhow::Result<String> {
        if m.0 < 0 {
            bail!("negative amount");
        }
        Ok(format!("{}.{:02}", m.0 / 100, m.0 % 100))
    });
    encoder
}

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Invoice {
    pub total: Money,
    pub lines: Vec<Money>,
    pub by_code: HashMap<Money, String>,
    pub note: String,
}

#[test]
fn test_custom_type_decode() {
    let values = values_from_pairs([
        ("total", "12.34"),
        ("lines", "1.00"),
        ("lines[2]", "0.05"),
        ("by_code[3.00]", "three"),
    ]);
    let mut invoice = Invoice::default();
    money_decoder().decode(&mut invoice, &values).unwrap();
    assert_eq!(invoice.total, Money(1234));
    assert_eq!(invoice.lines, vec![Money(100), Money(0), Money(5)]);
    assert_eq!(invoice.by_code[&Money(300)], "three");
}

#[test]
fn test_custom_decode_error() {
    let values = values_from_pairs([("total", "12"), ("note", "n")]);
    let mut invoice = Invoice::default();
    let errors = money_decoder().decode(&mut invoice, &values).unwrap_err();
    assert_eq!(invoice.note, "n");
    assert_eq!(invoice.total, Money(0));
    let err = errors.get("total").unwrap();
    assert!(matches!(err, Error::Conversion(_)));
    assert_eq!(err.to_string(), "missing cents in '12'");
}

#[test]
fn test_unregistered_custom_type_is_left_alone() {
    let values = values_from_pairs([("total", "12.34")]);
    let mut invoice = Invoice::default();
    Decoder::default().decode(&mut invoice, &values).unwrap();
    assert_eq!(invoice.total, Money(0));
    let encoded = Encoder::default()
        .encode(&Invoice {
            total: Money(5),
            ..Default::default()
        })
        .unwrap();
    assert!(!encoded.contains_key("total"));
}

#[test]
fn test_custom_type_encode() {
    let invoice = Invoice {
        total: Money(1234),
        lines: vec![Money(100), Money(5)],
        by_code: HashMap::from([(Money(300), "three".to_string())]),
        note: String::new(),
    };
    let output = money_encoder().encode_output(
        &invoice,
        EncodeOptions {
            columns: false,
            typed: true,
        },
    );
    assert!(output.is_ok());
    assert_eq!(output.values["total"], vec!["12.34"]);
    assert_eq!(output.values["lines[0]"], vec!["1.00"]);
    assert_eq!(output.values["lines[1]"], vec!["0.05"]);
    assert_eq!(output.values["by_code[3.00]"], vec!["three"]);
    assert!(matches!(
        &output.typed.unwrap()["total"],
        TypedValue::Opaque { text, .. } if text == "12.34"
    ));
}

#[test]
fn test_custom_encode_error() {
    let invoice = Invoice {
        total: Money(-1),
        note: "n".into(),
        ..Default::default()
    };
    let output = money_encoder().encode_output(&invoice, EncodeOptions::default());
    assert!(matches!(output.errors.get("total"), Some(Error::Conversion(_))));
    assert_eq!(output.values["note"], vec!["n"]);
}

#[test]
fn test_custom_function_overrides_builtin() {
    #[derive(FormObject, Debug, Default)]
    pub struct Shout {
        pub word: String,
        pub count: u32,
    }

    let mut decoder = Decoder::default();
    decoder.register_func(|text: &str| Ok::<_, BoxError>(text.to_uppercase()));
    let mut shout = Shout::default();
    let values = values_from_pairs([("word", "hey"), ("count", "2")]);
    decoder.decode(&mut shout, &values).unwrap();
    assert_eq!(shout.word, "HEY");
    assert_eq!(shout.count, 2);

    let mut encoder = Encoder::default();
    encoder.register_func(|n: &u32| Ok::<_, String>(format!("#{n}")));
    let values = encoder.encode(&shout).unwrap();
    assert_eq!(values["count"], vec!["#2"]);
    assert_eq!(values["word"], vec!["HEY"]);
}

/// Color written as `#rrggbb`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rgb(u8, u8, u8);

impl TextCodec for Rgb {
    fn decode_text(text: &str) -> Result<Self, BoxError> {
        let hex = text.strip_prefix('#').ok_or("color must start with '#'")?;
        if hex.len() != 6 {
            return Err(format!("bad color '{text}'").into());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn encode_text(&self) -> Result<String, BoxError> {
        Ok(format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2))
    }
}

impl_form_text!(Rgb);

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Theme {
    pub fg: Rgb,
    pub palette: Vec<Rgb>,
    pub named: HashMap<String, Rgb>,
    #[tag(form = "bg,omitempty")]
    pub bg: Rgb,
    pub server: Option<IpAddr>,
    pub listen: Option<SocketAddr>,
}

#[test]
fn test_text_codec_roundtrip() {
    let theme = Theme {
        fg: Rgb(255, 0, 16),
        palette: vec![Rgb(1, 2, 3), Rgb(4, 5, 6)],
        named: HashMap::from([("sky".to_string(), Rgb(0, 0, 255))]),
        bg: Rgb::default(),
        server: Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))),
        listen: Some("127.0.0.1:8080".parse().unwrap()),
    };
    let values = Encoder::default().encode(&theme).unwrap();
    assert_eq!(values["fg"], vec!["#ff0010"]);
    assert_eq!(values["palette[1]"], vec!["#040506"]);
    assert_eq!(values["named[sky]"], vec!["#0000ff"]);
    assert_eq!(values["server"], vec!["10.0.0.1"]);
    assert!(!values.contains_key("bg"));

    let mut decoded = Theme::default();
    Decoder::default().decode(&mut decoded, &values).unwrap();
    assert_eq!(decoded, theme);
}

#[test]
fn test_text_codec_error() {
    let values = values_from_pairs([("fg", "red"), ("server", "not-an-ip")]);
    let mut theme = Theme::default();
    let errors = Decoder::default().decode(&mut theme, &values).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("fg").unwrap().to_string(), "color must start with '#'");
    assert!(matches!(errors.get("server"), Some(Error::Conversion(_))));
    assert!(theme.server.is_none());
}
