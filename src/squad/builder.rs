//! Constraint model builder: enriched pool to a 0/1 program.

use super::config::{CountBound, SquadConfig};
use super::types::{Assignment, Line, PlayerRecord, Slot};
use crate::error::{Result, SquadError};
use crate::ip::{IpModel, IpSolution, Objective, VarId};
use tracing::debug;

const FIELD_LINES: usize = Line::FIELD.len();
const BENCH_LINES: usize = Line::BENCH.len();

/// The squad selection program over one prepared pool.
///
/// Declares, per player `p`:
///
/// - `selected[p]`: the player is in the squad;
/// - `on_field[p, l]` for each field line `l`;
/// - `bench[p, l]` for each bench line `l` (UTIL included).
///
/// Assignment variables live in flat arenas indexed by
/// `player * lines + line`, so lookups never hash. Assignments a player can
/// never take (ineligible lines, bench slots above the bench price limit)
/// keep their handles but are pinned to 0.
///
/// The objective maximizes the sum of selected players' adjusted averages;
/// which slot a player fills does not change their contribution.
#[derive(Debug, Clone)]
pub struct SquadModel {
    model: IpModel,
    selected: Vec<VarId>,
    on_field: Vec<VarId>,
    bench: Vec<VarId>,
}

impl SquadModel {
    /// Declares every variable and constraint for `players` under `config`.
    ///
    /// `players[i].index` must equal `i`, and every price and adjusted
    /// average must be finite.
    pub fn build(players: &[PlayerRecord], config: &SquadConfig) -> Result<Self> {
        config.validate()?;
        check_pool(players)?;

        let n = players.len();
        let mut model = IpModel::new("squad");
        let mut selected = Vec::with_capacity(n);
        let mut on_field = Vec::with_capacity(n * FIELD_LINES);
        let mut bench = Vec::with_capacity(n * BENCH_LINES);

        for p in players {
            selected.push(model.add_binary(format!("selected[{}]", p.index)));
            for line in Line::FIELD {
                on_field.push(model.add_binary(format!("on_field[{},{line}]", p.index)));
            }
            for line in Line::BENCH {
                bench.push(model.add_binary(format!("bench[{},{line}]", p.index)));
            }
        }

        let mut squad = Self {
            model,
            selected,
            on_field,
            bench,
        };

        squad.model.set_objective(Objective::Maximize {
            terms: players
                .iter()
                .map(|p| (squad.selected[p.index], p.adjusted_avg))
                .collect(),
        });

        squad.add_squad_constraints(players, config);
        squad.add_slot_constraints(players, config);
        for p in players {
            squad.add_player_constraints(p, config);
        }

        debug!(
            players = n,
            variables = squad.model.var_count(),
            free = squad.model.free_var_count(),
            constraints = squad.model.constraint_count(),
            "squad model built"
        );
        Ok(squad)
    }

    /// Squad size, salary cap and eligibility counts.
    fn add_squad_constraints(&mut self, players: &[PlayerRecord], config: &SquadConfig) {
        let everyone: Vec<(VarId, f64)> = self.selected.iter().map(|&v| (v, 1.0)).collect();
        self.model
            .add_eq("squad_size", everyone, f64::from(config.squad_size));

        let spend = players
            .iter()
            .map(|p| (self.selected[p.index], p.price))
            .collect();
        self.model.add_le("salary_cap", spend, config.salary_cap);

        for (line, bound) in config.eligibility.iter() {
            let terms: Vec<(VarId, f64)> = players
                .iter()
                .filter(|p| p.eligible.contains(line))
                .map(|p| (self.selected[p.index], 1.0))
                .collect();
            let name = format!("eligible[{line}]");
            match bound {
                CountBound::AtLeast(k) => self.model.add_ge(name, terms, f64::from(k)),
                CountBound::AtMost(k) => self.model.add_le(name, terms, f64::from(k)),
                CountBound::Exactly(k) => self.model.add_eq(name, terms, f64::from(k)),
            }
        }
    }

    /// Exact slot counts per on-field and bench line.
    fn add_slot_constraints(&mut self, players: &[PlayerRecord], config: &SquadConfig) {
        for line in Line::FIELD {
            let terms = players
                .iter()
                .filter_map(|p| self.on_field(p.index, line))
                .map(|v| (v, 1.0))
                .collect();
            self.model.add_eq(
                format!("slots_on_field[{line}]"),
                terms,
                f64::from(config.on_field.get(line)),
            );
        }
        for line in Line::BENCH {
            let terms = players
                .iter()
                .map(|p| (self.bench(p.index, line), 1.0))
                .collect();
            self.model.add_eq(
                format!("slots_bench[{line}]"),
                terms,
                f64::from(config.bench.get(line)),
            );
        }
    }

    /// Eligibility locks, bench price, linking and single slot for one
    /// player.
    ///
    /// Locked assignments are pinned to 0 rather than given their own rows,
    /// and so is every bench slot of a player priced above the bench limit.
    /// The player's slots then sum to exactly `selected[p]`: a selected
    /// player holds one slot and an unselected player holds none. Slot
    /// totals equal the squad size, so this admits the same squads as
    /// separate `slot <= selected` and `sum(slots) <= 1` rows.
    fn add_player_constraints(&mut self, p: &PlayerRecord, config: &SquadConfig) {
        let i = p.index;
        let pick = self.selected[i];
        let benchable = p.price <= config.bench_price_limit;
        let mut slots = Vec::with_capacity(FIELD_LINES + BENCH_LINES + 1);
        let mut open = 0usize;

        for line in Line::FIELD {
            let Some(v) = self.on_field(i, line) else {
                continue;
            };
            if p.eligible.admits(line) {
                open += 1;
            } else {
                self.model.fix(v, false);
            }
            slots.push((v, 1.0));
        }

        let mut bench_spend = Vec::with_capacity(BENCH_LINES);
        for line in Line::BENCH {
            let v = self.bench(i, line);
            if benchable && p.eligible.admits(line) {
                open += 1;
            } else {
                self.model.fix(v, false);
            }
            slots.push((v, 1.0));
            bench_spend.push((v, p.price));
        }

        if open == 0 {
            self.model.fix(pick, false);
        }
        slots.push((pick, -1.0));
        self.model.add_eq(format!("single_slot[{i}]"), slots, 0.0);

        // Only binds above the limit, where every bench slot is already
        // pinned; kept so solutions can be checked against it.
        if !benchable {
            self.model
                .add_le(format!("bench_price[{i}]"), bench_spend, config.bench_price_limit);
        }
    }

    /// The underlying 0/1 program.
    pub fn model(&self) -> &IpModel {
        &self.model
    }

    /// Number of players in the pool.
    pub fn player_count(&self) -> usize {
        self.selected.len()
    }

    /// Selection variable for a player.
    pub fn selected(&self, player: usize) -> VarId {
        self.selected[player]
    }

    /// On-field variable for (player, line). `None` for UTIL.
    pub fn on_field(&self, player: usize, line: Line) -> Option<VarId> {
        line.is_field()
            .then(|| self.on_field[player * FIELD_LINES + line.slot_index()])
    }

    /// Bench variable for (player, line).
    pub fn bench(&self, player: usize, line: Line) -> VarId {
        self.bench[player * BENCH_LINES + line.slot_index()]
    }

    /// Every assignment variable set to 1 in `solution`.
    ///
    /// Ordered by player, on-field lines before bench lines.
    pub fn assignments(&self, solution: &IpSolution) -> Vec<Assignment> {
        let mut out = Vec::new();
        for player in 0..self.player_count() {
            for line in Line::FIELD {
                if self
                    .on_field(player, line)
                    .is_some_and(|v| solution.value(v))
                {
                    out.push(Assignment {
                        player,
                        slot: Slot::OnField(line),
                    });
                }
            }
            for line in Line::BENCH {
                if solution.value(self.bench(player, line)) {
                    out.push(Assignment {
                        player,
                        slot: Slot::Bench(line),
                    });
                }
            }
        }
        out
    }
}

fn check_pool(players: &[PlayerRecord]) -> Result<()> {
    for (i, p) in players.iter().enumerate() {
        if p.index != i {
            return Err(SquadError::Model(format!(
                "player {:?} has index {}, expected {i}",
                p.name, p.index
            )));
        }
        if !p.price.is_finite() || p.price < 0.0 {
            return Err(SquadError::Model(format!(
                "player {:?} has invalid price {}",
                p.name, p.price
            )));
        }
        if !p.adjusted_avg.is_finite() {
            return Err(SquadError::Model(format!(
                "player {:?} has non-finite adjusted average",
                p.name
            )));
        }
    }
    Ok(())
}
