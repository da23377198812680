// Copyright (c) 2022-2023 The Beam Developers

//! Confirmation prompts, rendered by the platform [Driver]
//!
//! Prompts are built from paginated titled pages with normal and bold text
//! segments, mirroring the Beam firmware confirmation layouts.

use alloc::{vec, vec::Vec};
use core::fmt::{self, Write};

use strum::{Display, EnumIter};

use crate::{
    helpers::{fmt_beam_amount, fmt_u64},
    tx::TxAggrInfo,
    types::{CoinId, KernelParams},
};

use super::{Driver, Error};

/// Maximum page title length
pub const TITLE_LEN: usize = 32;

/// Maximum text segment length
pub const TEXT_LEN: usize = 96;

/// Maximum text segments per page
pub const MAX_SEGMENTS: usize = 8;

pub const EXPORT_WARNING: &str =
    "Exposing the key to a third party allows them to see your balance.";
pub const WAIT_WARNING: &str = "Please wait few seconds until exporting is done";

/// Prompt kind, used by drivers to select icons and button behaviour
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum PromptKind {
    /// Key export and informational prompts
    ProtectCall,
    /// Kernel signing review
    SignTx,
    /// Coin transfer and spending review
    ConfirmOutput,
}

/// Text segment
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Text {
    Normal(heapless::String<TEXT_LEN>),
    Bold(heapless::String<TEXT_LEN>),
}

impl Text {
    pub fn as_str(&self) -> &str {
        match self {
            Text::Normal(s) | Text::Bold(s) => s.as_str(),
        }
    }
}

/// Single prompt page
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Page {
    pub title: heapless::String<TITLE_LEN>,
    pub text: heapless::Vec<Text, MAX_SEGMENTS>,
}

fn string<const N: usize>(args: fmt::Arguments) -> heapless::String<N> {
    let mut s = heapless::String::new();
    // Overlong values are truncated at the segment limit
    let _ = s.write_fmt(args);
    s
}

fn hex(bytes: &[u8]) -> heapless::String<TEXT_LEN> {
    let mut s = heapless::String::new();
    for b in bytes {
        if write!(s, "{b:02x}").is_err() {
            break;
        }
    }
    s
}

impl Page {
    pub fn new(title: &str) -> Self {
        Self {
            title: string(format_args!("{title}")),
            text: heapless::Vec::new(),
        }
    }

    fn push(mut self, t: Text) -> Self {
        let _ = self.text.push(t);
        self
    }

    pub fn normal(self, s: &str) -> Self {
        self.push(Text::Normal(string(format_args!("{s}"))))
    }

    pub fn bold(self, s: &str) -> Self {
        self.push(Text::Bold(string(format_args!("{s}"))))
    }

    /// Fetch concatenated page text
    pub fn body(&self) -> alloc::string::String {
        self.text.iter().map(|t| t.as_str()).collect()
    }
}

/// Confirmation prompt
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Prompt {
    pub kind: PromptKind,
    pub pages: Vec<Page>,
}

impl Prompt {
    pub fn new(kind: PromptKind, pages: Vec<Page>) -> Self {
        Self { kind, pages }
    }

    /// Fetch the title of the first page
    pub fn title(&self) -> &str {
        self.pages.first().map(|p| p.title.as_str()).unwrap_or("")
    }

    /// Single page informational notice
    pub fn notice(title: &str, message: &str) -> Self {
        Self::new(PromptKind::ProtectCall, vec![Page::new(title).normal(message)])
    }

    /// Single page hex value display
    pub fn hex(title: &str, value: &[u8]) -> Self {
        let p = Page::new(title).push(Text::Normal(hex(value)));
        Self::new(PromptKind::ProtectCall, vec![p])
    }

    /// Nonce slot count display
    pub fn num_slots(n: u32) -> Self {
        let mut buff = [0u8; 24];

        let p = Page::new("Nonce slots")
            .normal("Number of available nonce slots is:")
            .bold(fmt_u64(n as u64, &mut buff));

        Self::new(PromptKind::ProtectCall, vec![p])
    }

    /// Input / output coin listing, two pages per coin
    pub fn transfer(inputs: &[CoinId], outputs: &[CoinId]) -> Self {
        let mut pages = Vec::with_capacity((inputs.len() + outputs.len()) * 2);

        for (dir, coins) in [("input", inputs), ("output", outputs)] {
            for (i, c) in coins.iter().enumerate() {
                let title: heapless::String<TITLE_LEN> =
                    string(format_args!("Confirm {dir} ({}/{})", i + 1, coins.len()));

                let mut buff = [0u8; 32];
                pages.push(
                    Page::new(&title)
                        .normal("Idx: ")
                        .bold(fmt_u64(c.idx, &mut buff))
                        .normal("Type: ")
                        .bold(fmt_u64(c.kind as u64, &mut buff)),
                );

                let p = Page::new(&title)
                    .normal("SubIdx: ")
                    .bold(fmt_u64(c.sub_idx as u64, &mut buff));

                let p = match c.asset_id {
                    0 => p.normal("Amount:").bold(fmt_beam_amount(c.amount, &mut buff)),
                    id => {
                        let label: heapless::String<TEXT_LEN> =
                            string(format_args!("Amount A{id}:"));
                        p.normal(&label).bold(fmt_u64(c.amount, &mut buff))
                    }
                };
                pages.push(p);
            }
        }

        Self::new(PromptKind::ConfirmOutput, pages)
    }

    /// Kernel parameter review, four pages
    pub fn kernel_info(title: &str, k: &KernelParams) -> Self {
        let page = |n: usize| -> Page {
            let t: heapless::String<TITLE_LEN> = string(format_args!("{title} {n}/4"));
            Page::new(&t)
        };

        let mut buff = [0u8; 24];
        let heights: heapless::String<TEXT_LEN> =
            string(format_args!("{{ {}; {} }}", k.min_height, k.max_height));

        let pages = vec![
            page(1)
                .normal("Fee: ")
                .bold(fmt_u64(k.fee, &mut buff))
                .normal("Height: ")
                .bold(&heights),
            page(2)
                .normal("Commitment x: ")
                .push(Text::Bold(hex(&k.commitment.x)))
                .normal(" y: ")
                .bold(if k.commitment.y { "1" } else { "0" }),
            page(3)
                .normal("Signature Nonce pub x: ")
                .push(Text::Bold(hex(&k.signature.nonce_pub.x)))
                .normal(" y: ")
                .bold(if k.signature.nonce_pub.y { "1" } else { "0" }),
            page(4)
                .normal("Signature Scalar K: ")
                .push(Text::Bold(hex(k.signature.sign_k.as_bytes()))),
        ];

        Self::new(PromptKind::SignTx, pages)
    }

    /// Aggregated spending review
    pub fn tx_aggr(title: &str, aggr: &TxAggrInfo, fee: u64) -> Self {
        let mut buff = [0u8; 32];
        let (amount, asset_id) = aggr.spent(fee);

        let p = Page::new(title).normal("Amount:");

        let p = match asset_id {
            0 => p.bold(fmt_beam_amount(amount, &mut buff)),
            id => {
                let p = p.bold(fmt_u64(amount, &mut buff)).normal("Asset ID: ");
                p.bold(fmt_u64(id as u64, &mut buff))
            }
        };

        Self::new(PromptKind::ConfirmOutput, vec![p])
    }
}

/// Request user confirmation, returning [`Error::ActionCancelled`] if declined
pub fn require_confirm<DRV: Driver>(drv: &mut DRV, p: &Prompt) -> Result<(), Error> {
    match drv.confirm(p) {
        true => Ok(()),
        false => {
            #[cfg(feature = "log")]
            log::warn!("prompt '{}' declined", p.title());

            Err(Error::ActionCancelled)
        }
    }
}

/// Request hold-to-confirm user confirmation, returning [`Error::ActionCancelled`] if declined
pub fn require_hold<DRV: Driver>(drv: &mut DRV, p: &Prompt) -> Result<(), Error> {
    match drv.confirm_hold(p) {
        true => Ok(()),
        false => {
            #[cfg(feature = "log")]
            log::warn!("hold prompt '{}' declined", p.title());

            Err(Error::ActionCancelled)
        }
    }
}
