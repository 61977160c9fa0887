//! Receive address and public key screens.

use crate::core::component::UiResult;
use crate::core::display::Font;
use crate::core::text::layout::chunkify;
use crate::error::{Result, UiError};
use crate::layouts::host::ButtonRequestType;
use crate::layouts::screens::Screen;
use crate::layouts::{interact, UiContext};
use crate::widgets::paginated::Paginated;

/// What [`show_address`] shows besides the address itself.
#[derive(Debug, Clone)]
pub struct AddressDetails<'s> {
    pub title: Option<&'s str>,
    /// Network name shown above the address.
    pub network: Option<&'s str>,
    pub path: Option<&'s str>,
    pub account: Option<&'s str>,
    /// Position of this wallet's key among `xpubs`, for multisig addresses.
    pub multisig_index: Option<usize>,
    pub xpubs: Vec<String>,
    pub mismatch_title: Option<&'s str>,
    pub details_title: Option<&'s str>,
    pub br_name: &'s str,
    pub br_code: ButtonRequestType,
    pub chunkify: bool,
}

impl Default for AddressDetails<'_> {
    fn default() -> Self {
        Self {
            title: None,
            network: None,
            path: None,
            account: None,
            multisig_index: None,
            xpubs: Vec::new(),
            mismatch_title: None,
            details_title: None,
            br_name: "show_address",
            br_code: ButtonRequestType::Address,
            chunkify: false,
        }
    }
}

/// Show `address` until the user confirms it or reports a mismatch.
///
/// The info control opens the details (account, path, multisig keys). Any other answer leads to
/// the mismatch screen, from which the user can go back or abort with `ActionCancelled`. Only
/// the first appearance of the address sends a button request.
pub fn show_address(
    ctx: &mut UiContext<'_>,
    address: &str,
    details: &AddressDetails<'_>,
) -> Result<()> {
    let (title, details_title) = match details.title {
        Some(title) => (
            title.to_string(),
            details.details_title.unwrap_or(title).to_string(),
        ),
        None => {
            let mut title = ctx.tr("address__title_receive_address");
            if details.multisig_index.is_some() {
                title.push_str("\n(MULTISIG)");
            }
            (title, ctx.tr("address_details__title_receive_address"))
        }
    };
    let mismatch_title = details
        .mismatch_title
        .map(str::to_string)
        .unwrap_or_else(|| ctx.tr("addr_mismatch__mismatch"));
    let shown = if details.chunkify {
        chunkify(address, 4, 4)
    } else {
        address.to_string()
    };

    let mut screen = Screen::new(title.as_str());
    if let Some(network) = details.network {
        screen = screen.bold(network);
    }
    let mut address_screen = screen
        .value(shown, Font::Mono)
        .verb(ctx.button("buttons__confirm"))
        .verb_info(Some(ctx.button("buttons__info")))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .build(ctx);

    let mut details_screen = details_layout(ctx, &details_title, address, details);
    let mut send_request = true;
    loop {
        let br_name = send_request.then_some(details.br_name);
        send_request = false;
        match interact(ctx, &mut address_screen, br_name, details.br_code, None)? {
            UiResult::Confirmed => return Ok(()),
            UiResult::Info => {
                interact(ctx, &mut details_screen, None, details.br_code, None)?;
            }
            _ => {
                if show_mismatch(ctx, &mismatch_title)? {
                    return Err(UiError::ActionCancelled);
                }
            }
        }
    }
}

fn details_layout(
    ctx: &UiContext<'_>,
    title: &str,
    address: &str,
    details: &AddressDetails<'_>,
) -> Paginated {
    let mut screen = Screen::new(title).paragraph(Font::Mono, address);
    if let Some(account) = details.account {
        screen = screen
            .bold(ctx.tr("address_details__account"))
            .normal(account);
    }
    if let Some(path) = details.path {
        screen = screen
            .bold(ctx.tr("address_details__derivation_path"))
            .normal(path);
    }
    let mut pages = screen.content_pages(ctx);
    for (index, xpub) in details.xpubs.iter().enumerate() {
        let owner = if Some(index) == details.multisig_index {
            ctx.tr("address__title_yours")
        } else {
            ctx.tr("address__title_cosigner")
        };
        let xpub_title = format!("MULTISIG XPUB #{}\n({owner})", index + 1);
        pages.extend(
            Screen::new(xpub_title)
                .value(xpub.as_str(), Font::Mono)
                .content_pages(ctx),
        );
    }
    Screen::new(title)
        .verb_cancel(Some(ctx.button("buttons__back")))
        .assemble(ctx, pages)
}

/// Public key variant of [`show_address`].
pub fn show_pubkey(
    ctx: &mut UiContext<'_>,
    pubkey: &str,
    title: Option<&str>,
    account: Option<&str>,
    path: Option<&str>,
) -> Result<()> {
    let default_title = ctx.tr("address__public_key");
    let mismatch_title = ctx.tr("addr_mismatch__key_mismatch");
    let details = AddressDetails {
        title: Some(title.unwrap_or(&default_title)),
        account,
        path,
        mismatch_title: Some(&mismatch_title),
        br_name: "show_pubkey",
        br_code: ButtonRequestType::PublicKey,
        ..AddressDetails::default()
    };
    show_address(ctx, pubkey, &details)
}

/// "Address mismatch?" screen. Returns `true` when the user chose to quit.
pub(crate) fn show_mismatch(ctx: &mut UiContext<'_>, title: &str) -> Result<bool> {
    let component = Screen::new(title)
        .normal(ctx.tr("addr_mismatch__contact_support"))
        .verb(ctx.button("buttons__quit"))
        .verb_cancel(Some(ctx.button("buttons__back")))
        .build(ctx);
    Ok(interact(ctx, component, None, ButtonRequestType::Other, None)? == UiResult::Confirmed)
}
