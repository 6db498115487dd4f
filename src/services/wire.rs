//! JSON payloads exchanged with the game backend.
//!
//! DTOs mirror the wire format field for field. Conversion into domain types
//! is where responses are validated: the slot must parse and match the
//! request, pools must pass `CasePool::new`, offers must not repeat a prize
//! the player can already see.

use serde::{Deserialize, Serialize};

use super::error::{Result, ServiceError};
use crate::core::{Case, CaseNumber, Prize, PrizeId, Slot, Tier};
use crate::game::{BankerOffer, OfferRequest};
use crate::pool::CasePool;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: u64,
    pub name: String,
    pub team: String,
}

impl From<PlayerDto> for Prize {
    fn from(dto: PlayerDto) -> Self {
        Prize::new(PrizeId::new(dto.id), dto.name, dto.team)
    }
}

impl From<&Prize> for PlayerDto {
    fn from(prize: &Prize) -> Self {
        Self {
            id: prize.id.raw(),
            name: prize.name.clone(),
            team: prize.group.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseDto {
    pub case: u8,
    pub tier: u8,
    pub player: PlayerDto,
    pub score: f64,
}

/// `GET /game/cases_by_slot`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CasesResponse {
    pub season: String,
    pub seed: u64,
    pub slot: String,
    pub cases: Vec<CaseDto>,
}

impl CasesResponse {
    /// Encode a pool for the wire.
    #[must_use]
    pub fn from_pool(pool: &CasePool) -> Self {
        Self {
            season: pool.season().to_string(),
            seed: pool.seed(),
            slot: pool.slot().code().to_string(),
            cases: pool
                .cases_by_number()
                .iter()
                .map(|case| CaseDto {
                    case: case.number.raw(),
                    tier: case.tier.raw(),
                    player: PlayerDto::from(&case.prize),
                    score: case.score,
                })
                .collect(),
        }
    }

    /// Validate the response and build the pool it describes.
    pub fn into_pool(self, requested: Slot, pool_size: usize) -> Result<CasePool> {
        let slot: Slot = self.slot.parse()?;
        if slot != requested {
            return Err(ServiceError::SlotMismatch {
                expected: requested,
                got: slot,
            });
        }

        let cases = self
            .cases
            .into_iter()
            .map(|dto| {
                Case::new(
                    CaseNumber::new(dto.case),
                    Tier::new(dto.tier),
                    dto.player.into(),
                    dto.score,
                )
            })
            .collect();
        Ok(CasePool::new(self.season, self.seed, slot, cases, pool_size)?)
    }
}

/// `GET /game/banker_offer`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OfferResponse {
    pub slot: String,
    pub target_tier: u8,
    pub picked_tier: u8,
    pub player: PlayerDto,
}

impl OfferResponse {
    /// Encode an offer for the wire.
    #[must_use]
    pub fn from_offer(slot: Slot, offer: &BankerOffer) -> Self {
        Self {
            slot: slot.code().to_string(),
            target_tier: offer.target_tier.raw(),
            picked_tier: offer.picked_tier.raw(),
            player: PlayerDto::from(&offer.prize),
        }
    }

    /// Validate the response against the request that produced it.
    pub fn into_offer(self, request: &OfferRequest) -> Result<BankerOffer> {
        let slot: Slot = self.slot.parse()?;
        if slot != request.slot {
            return Err(ServiceError::SlotMismatch {
                expected: request.slot,
                got: slot,
            });
        }
        if self.target_tier != request.target_tier.raw() {
            return Err(ServiceError::InvalidOffer(format!(
                "asked for tier {}, banker answered for tier {}",
                request.target_tier.raw(),
                self.target_tier
            )));
        }

        let prize: Prize = self.player.into();
        if request.exclude.contains(&prize.id) {
            return Err(ServiceError::InvalidOffer(format!(
                "{prize} is already in the pool"
            )));
        }

        Ok(BankerOffer {
            target_tier: request.target_tier,
            picked_tier: Tier::new(self.picked_tier),
            prize,
        })
    }
}

/// `GET /players/search`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub players: Vec<PlayerDto>,
}

impl SearchResponse {
    #[must_use]
    pub fn into_prizes(self) -> Vec<Prize> {
        self.players.into_iter().map(Prize::from).collect()
    }
}

/// `GET /health`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
