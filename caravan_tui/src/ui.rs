use caravan::{
    pile_label, Caravan, CaravanPosition, Card, Location, PlayerPosition, RoundManager, RoundState,
    ACTIVE_PLAYER, MAX_HEIGHT,
};
use ratatui::{prelude::*, widgets::*};

const CARD_WIDTH: u16 = 5;

/// Room for the pile and the free slot above it, plus the border.
const CARAVAN_WIDGET_HEIGHT: u16 = MAX_HEIGHT as u16 + 3;

/// Where the picked card is drawn within a caravan, and whether it may go there.
#[derive(Clone, Copy)]
struct PickedMarker {
    card: Card,
    card_index: usize,
    location: Location,
    correct: bool,
}

struct CaravanWidget<'a> {
    caravan: &'a Caravan,
    position: CaravanPosition,
    /// The top player's caravans are drawn growing towards the top of the screen.
    grows_upwards: bool,
    picked: Option<PickedMarker>,
    selected_for_discard: bool,
}

fn card_style(card: Card) -> Style {
    match card.suit {
        Some(suit) if suit.is_red() => Style::new().fg(Color::Red),
        Some(_) => Style::new(),
        None => Style::new().fg(Color::Magenta),
    }
}

impl Widget for CaravanWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected_for_discard {
            Style::new().fg(Color::Yellow)
        } else if self.caravan.is_sold() {
            Style::new().fg(Color::Green)
        } else {
            Style::new()
        };
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::all())
            .border_style(border_style)
            .title(format!(" {:?} {} ", self.position, self.caravan.value()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line_y = |i: usize| -> Option<u16> {
            let i = u16::try_from(i).ok().filter(|&i| i < inner.height)?;
            Some(if self.grows_upwards {
                inner.bottom() - 1 - i
            } else {
                inner.y + i
            })
        };

        for (i, &card) in self.caravan.cards().iter().enumerate() {
            let Some(y) = line_y(i) else { break };
            buf.set_string(
                inner.x + 1,
                y,
                pile_label(self.caravan, i),
                card_style(card),
            );
        }

        if let Some(marker) = self.picked {
            let Some(y) = line_y(marker.card_index) else {
                return;
            };
            let colour = if marker.correct { Color::Green } else { Color::Red };
            let style = Style::new().fg(Color::Black).bg(colour);
            let x = match marker.location {
                Location::Top => inner.x + 1,
                // Next to the card it would be attached to
                Location::Other => inner.x + 1 + 3 * CARD_WIDTH,
            };
            if x < inner.right() {
                buf.set_string(x, y, format!(" {} ", marker.card), style);
            }
        }
    }
}

struct HandWidget<'a> {
    cards: &'a [Card],
    cursor: Option<usize>,
    deck_len: usize,
}

impl Widget for HandWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::all())
            .title(format!(" Hand, {} left in deck ", self.deck_len));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let mut x = inner.x + 1;
        for (i, &card) in self.cards.iter().enumerate() {
            if x + CARD_WIDTH > inner.right() {
                break;
            }
            let mut style = card_style(card);
            if self.cursor == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            buf.set_string(x, inner.y, format!(" {} ", card), style);
            x += CARD_WIDTH;
        }
    }
}

fn help_text(state: &RoundState) -> &'static str {
    match state {
        RoundState::SelectCard => {
            "←→ choose card   Enter/w pick   q discard card   e discard caravan   Esc/r quit"
        }
        RoundState::PlaceCard(_) => "←↑↓→ move card   Enter/w place   Esc/r back",
        RoundState::DiscardCaravan(_) => "←→ choose caravan   Enter/w discard   Esc/r back",
        RoundState::ConfirmExit => "Leave the round? Enter/w yes   Esc/r no",
        RoundState::Exited => "",
    }
}

/// Names a player by the seat they started the round in, so the name stays
/// with them when the sides are swapped.
pub fn player_name(starting_seat: PlayerPosition) -> &'static str {
    match starting_seat {
        PlayerPosition::Bottom => "Player 1",
        PlayerPosition::Top => "Player 2",
    }
}

fn status_text(round: &RoundManager) -> String {
    let mut status = format!(
        "Turn {}, {} to play",
        round.turn_count(),
        player_name(round.starting_seat(ACTIVE_PLAYER))
    );
    if round.in_opening() {
        status += " (opening)";
    }
    if let Some(winner) = round.winner() {
        status += &format!("   {} wins", player_name(winner));
    }
    status
}

fn render_caravans(frame: &mut Frame, area: Rect, round: &RoundManager, player: PlayerPosition) {
    let columns = Layout::new(Direction::Horizontal, [Constraint::Ratio(1, 3); 3]).split(area);
    let picked = match round.state() {
        RoundState::PlaceCard(picked) if picked.position.player == player => Some(picked),
        _ => None,
    };
    let discard = if player == ACTIVE_PLAYER {
        round.selected_discard_caravan()
    } else {
        None
    };
    for (position, &column) in CaravanPosition::ALL.into_iter().zip(columns.iter()) {
        let marker = picked
            .filter(|picked| picked.position.caravan == position)
            .map(|picked| PickedMarker {
                card: picked.card,
                card_index: picked.position.card_index,
                location: picked.position.location,
                correct: round.is_current_picked_card_position_correct(),
            });
        let widget = CaravanWidget {
            caravan: round.table().caravan(player, position),
            position,
            grows_upwards: player == PlayerPosition::Top,
            picked: marker,
            selected_for_discard: discard == Some(position),
        };
        frame.render_widget(widget, column);
    }
}

/// Draws the whole round: the opponent's caravans at the top, the active
/// player's caravans and hand below, and a status bar.
pub fn draw(frame: &mut Frame, round: &RoundManager) {
    let main_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Length(CARAVAN_WIDGET_HEIGHT),
            Constraint::Length(CARAVAN_WIDGET_HEIGHT),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ],
    )
    .split(frame.size());

    render_caravans(frame, main_layout[0], round, ACTIVE_PLAYER.opponent());
    render_caravans(frame, main_layout[1], round, ACTIVE_PLAYER);

    let hand = round.hand();
    let cursor = match round.state() {
        RoundState::SelectCard => Some(hand.index()),
        RoundState::PlaceCard(picked) => Some(picked.hand_index),
        _ => None,
    };
    frame.render_widget(
        HandWidget {
            cards: hand.items(),
            cursor,
            deck_len: round.table().player(ACTIVE_PLAYER).deck.len(),
        },
        main_layout[2],
    );
    frame.render_widget(Paragraph::new(status_text(round)), main_layout[3]);
    frame.render_widget(
        Paragraph::new(help_text(round.state())).style(Style::new().add_modifier(Modifier::DIM)),
        main_layout[4],
    );
}

#[cfg(test)]
mod tests {
    use caravan::{card, Deck, Hand, Player, RoundConfig, Table};
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text += buffer.get(x, y).symbol();
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn draws_table_and_hand() {
        let mut table = Table::new(
            Player::new(Deck::default(), Hand::default()),
            Player::new(Deck::new(vec![card!("2♣")]), Hand::new(vec![card!("7♠"), card!("K♥")])),
        );
        table
            .caravan_mut(PlayerPosition::Top, CaravanPosition::Middle)
            .append(card!("T♦"))
            .unwrap();
        let mut round = RoundManager::new(&mut table, RoundConfig::default());
        round.pick_selected_card().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(90, 28)).unwrap();
        terminal.draw(|frame| draw(frame, &round)).unwrap();
        let text = buffer_text(terminal.backend().buffer());

        assert!(text.contains("Middle 10"));
        assert!(text.contains("10♦"));
        assert!(text.contains("Hand, 1 left in deck"));
        assert!(text.contains(" K♥ "));
        assert!(text.contains("Turn 1"));
        assert!(text.contains("Enter/w place"));
    }

    #[test]
    fn status_shows_the_winner() {
        let mut table = Table::new(
            Player::new(Deck::default(), Hand::default()),
            Player::new(Deck::default(), Hand::default()),
        );
        for position in CaravanPosition::ALL {
            let caravan = table.caravan_mut(PlayerPosition::Top, position);
            for card in [card!("T♠"), card!("9♠"), card!("4♠")] {
                caravan.append(card).unwrap();
            }
        }
        let config = RoundConfig {
            opening_rule: true,
            ..RoundConfig::default()
        };
        let mut round = RoundManager::new(&mut table, config);
        assert_eq!(
            status_text(&round),
            "Turn 1, Player 1 to play (opening)   Player 2 wins"
        );
        // The winner stays the same person after swapping seats
        round.swap_sides().unwrap();
        assert_eq!(
            status_text(&round),
            "Turn 1, Player 2 to play (opening)   Player 2 wins"
        );
    }
}
