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

//! RFC 3339 timestamps. Output is second precision, UTC rendered with `Z`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};

use crate::codec::{FormDefault, FormValue};
use crate::encoder::TypedValue;
use crate::error::Error;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::types::{FieldKind, Position};

fn epoch() -> DateTime<Utc> {
    NaiveDateTime::default().and_utc()
}

fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text)
}

macro_rules! impl_datetime_form_value {
    ($ty:ty, $name:literal, $from_fixed:expr) => {
        impl FormDefault for $ty {
            #[inline(always)]
            fn form_default() -> Self {
                <$ty>::from(epoch())
            }
        }

        impl FormValue for $ty {
            #[inline(always)]
            fn form_kind() -> FieldKind {
                FieldKind::Timestamp
            }

            fn form_decode(
                &mut self,
                ctx: &mut DecodeContext<'_>,
                namespace: &str,
                idx: usize,
                _in_option: bool,
            ) -> bool {
                let raw = match ctx.value_at(namespace, idx) {
                    Some(raw) if !raw.is_empty() => raw,
                    _ => return false,
                };
                match parse_timestamp(raw) {
                    Ok(ts) => {
                        *self = $from_fixed(ts);
                        true
                    }
                    Err(_) => {
                        let err = Error::type_mismatch("timestamp", raw, $name, namespace);
                        ctx.set_error(namespace, err);
                        false
                    }
                }
            }

            fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
                let text = self.to_rfc3339_opts(SecondsFormat::Secs, true);
                let fixed = DateTime::<FixedOffset>::from(*self);
                ctx.set_val(position.apply(namespace), text, |_| TypedValue::Timestamp(fixed));
            }

            fn form_has_value(&self) -> bool {
                *self != Self::form_default()
            }

            fn form_typed(&self) -> Option<TypedValue> {
                Some(TypedValue::Timestamp(DateTime::<FixedOffset>::from(*self)))
            }

            fn form_decode_key(key: &str, namespace: &str) -> Result<Self, Error> {
                parse_timestamp(key)
                    .map($from_fixed)
                    .map_err(|_| Error::type_mismatch("timestamp", key, $name, namespace))
            }

            fn form_encode_key(&self) -> Option<String> {
                Some(self.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    };
}

impl_datetime_form_value!(DateTime<Utc>, "DateTime<Utc>", |ts: DateTime<FixedOffset>| ts
    .with_timezone(&Utc));
impl_datetime_form_value!(
    DateTime<FixedOffset>,
    "DateTime<FixedOffset>",
    |ts: DateTime<FixedOffset>| ts
);
