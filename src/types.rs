//! Types for the price tracker

use crate::error::RefreshError;
use serde::{Deserialize, Serialize};

/// Raw payload returned by the price endpoint
///
/// Every field is optional on the wire. Use [`SnapshotPayload::validate`] to
/// obtain a [`PriceSnapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotPayload {
    pub price_usd: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub ath: Option<f64>,
    pub atl: Option<f64>,
    pub max_supply: Option<f64>,
    pub ath_date: Option<String>,
    pub atl_date: Option<String>,
    pub last_updated: Option<String>,
    pub error: Option<String>,
}

impl SnapshotPayload {
    /// Creates an error payload
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
            ..Default::default()
        }
    }

    /// Converts the payload into a fully valid snapshot
    ///
    /// An `error` field wins over everything else. Otherwise every numeric
    /// field must be present and finite; partial snapshots are rejected.
    pub fn validate(self) -> Result<PriceSnapshot, RefreshError> {
        if let Some(msg) = self.error {
            return Err(RefreshError::DataUnavailable(msg));
        }

        fn required(value: Option<f64>, field: &str) -> Result<f64, RefreshError> {
            match value {
                Some(v) if v.is_finite() => Ok(v),
                Some(_) => Err(RefreshError::transport(format!(
                    "incomplete snapshot: non-finite `{}`",
                    field
                ))),
                None => Err(RefreshError::transport(format!(
                    "incomplete snapshot: missing `{}`",
                    field
                ))),
            }
        }

        Ok(PriceSnapshot {
            price_usd: required(self.price_usd, "price_usd")?,
            price_change_24h: required(self.price_change_24h, "price_change_24h")?,
            market_cap: required(self.market_cap, "market_cap")?,
            volume_24h: required(self.volume_24h, "volume_24h")?,
            circulating_supply: required(self.circulating_supply, "circulating_supply")?,
            ath: required(self.ath, "ath")?,
            atl: required(self.atl, "atl")?,
            max_supply: self.max_supply.filter(|v| v.is_finite()),
            ath_date: self.ath_date,
            atl_date: self.atl_date,
            last_updated: self.last_updated,
        })
    }
}

/// One fetched, self-consistent set of price and market fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Current spot price in USD
    pub price_usd: f64,
    /// 24h price change percentage
    pub price_change_24h: f64,
    /// Market capitalisation in USD
    pub market_cap: f64,
    /// 24h traded volume in USD
    pub volume_24h: f64,
    /// Circulating supply in base currency units
    pub circulating_supply: f64,
    /// All-time high price in USD
    pub ath: f64,
    /// All-time low price in USD
    pub atl: f64,
    /// Informational, never rendered
    pub max_supply: Option<f64>,
    pub ath_date: Option<String>,
    pub atl_date: Option<String>,
    pub last_updated: Option<String>,
}

/// Named display slots the controller writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    CurrentPrice,
    UpdatePrice,
    ChangeAmount,
    ChangePeriod,
    UpdateChange,
    MarketCap,
    UpdateMarketCap,
    Volume24h,
    UpdateVolume,
    CirculatingSupply,
    Ath,
    Atl,
    LastUpdated,
}

impl Slot {
    /// Element id of the slot on the page
    pub fn id(&self) -> &'static str {
        match self {
            Slot::CurrentPrice => "current-price",
            Slot::UpdatePrice => "update-price",
            Slot::ChangeAmount => "change-amount",
            Slot::ChangePeriod => "change-period",
            Slot::UpdateChange => "update-change",
            Slot::MarketCap => "market-cap",
            Slot::UpdateMarketCap => "update-market-cap",
            Slot::Volume24h => "volume-24h",
            Slot::UpdateVolume => "update-volume",
            Slot::CirculatingSupply => "circulating-supply",
            Slot::Ath => "ath",
            Slot::Atl => "atl",
            Slot::LastUpdated => "last-updated",
        }
    }

    /// Get all slots
    pub fn all() -> &'static [Slot] {
        &[
            Slot::CurrentPrice,
            Slot::UpdatePrice,
            Slot::ChangeAmount,
            Slot::ChangePeriod,
            Slot::UpdateChange,
            Slot::MarketCap,
            Slot::UpdateMarketCap,
            Slot::Volume24h,
            Slot::UpdateVolume,
            Slot::CirculatingSupply,
            Slot::Ath,
            Slot::Atl,
            Slot::LastUpdated,
        ]
    }
}

/// Style hint for the 24h change badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTone {
    /// Zero or positive change
    Positive,
    Negative,
}

impl ChangeTone {
    /// Tone for a change percentage; zero counts as positive
    pub fn for_change(change: f64) -> Self {
        if change >= 0.0 {
            ChangeTone::Positive
        } else {
            ChangeTone::Negative
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ChangeTone::Positive => "positive",
            ChangeTone::Negative => "negative",
        }
    }
}

/// Kind of a transient notification banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "notification-info",
            NotificationKind::Success => "notification-success",
            NotificationKind::Error => "notification-error",
        }
    }
}

/// Position of an interactive element, in page pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: String,
    pub left: f64,
    pub top: f64,
}

impl Anchor {
    pub fn new(id: impl Into<String>, left: f64, top: f64) -> Self {
        Self {
            id: id.into(),
            left,
            top,
        }
    }
}

/// User input forwarded by the embedding page
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed
    KeyDown { ctrl: bool, key: char },
    /// The refresh button was clicked
    RefreshClicked,
    /// A click somewhere on the page; `stat_card` is the closest stat card, if any
    Click { stat_card: Option<Anchor> },
    /// The chart element was clicked
    ChartClicked,
    /// The window was resized
    Resize,
}
