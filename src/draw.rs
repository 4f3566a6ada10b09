use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::components::cards::StatCards;
use crate::state::app_state::{AtBatField, ScorebookMode};
use crate::state::worker::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use wiffle_league::stats::{self, BattingLine, LeaderStat, PitchingLine, matchup};
use wiffle_league::{Decision, Game, GameStatus};

static TABS: &[&str; 5] = &["Scorebook", "Player", "Matchups", "Leaders", "Games"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Scorebook => draw_scorebook(f, layout.main, app),
                MenuItem::Player => draw_player(f, layout.main, app),
                MenuItem::Matchups => draw_matchups(f, layout.main, app),
                MenuItem::Leaders => draw_leaders(f, layout.main, app),
                MenuItem::Games => draw_games(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }

            if app.state.show_logs {
                draw_logs(f, layout.main);
            }

            draw_status_bar(f, layout.status_bar, app);
            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Scorebook => 0,
        MenuItem::Player => 1,
        MenuItem::Matchups => 2,
        MenuItem::Leaders => 3,
        MenuItem::Games => 4,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Scorebook
// ---------------------------------------------------------------------------

fn draw_scorebook(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Scorebook ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.loaded {
        f.render_widget(
            Paragraph::new("Loading league data...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    match app.state.scorebook.mode {
        ScorebookMode::AtBat => draw_atbat_form(f, inner, app),
        ScorebookMode::StartGame => draw_start_game(f, inner, app),
        ScorebookMode::EndGame => draw_end_game(f, inner, app),
        ScorebookMode::UndoConfirm => draw_undo_confirm(f, inner, app),
        ScorebookMode::AddPlayer => draw_add_player(f, inner, app),
        ScorebookMode::Reset => draw_reset(f, inner, app),
    }
}

fn draw_atbat_form(f: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.state.selected_active_game() else {
        f.render_widget(
            Paragraph::new(
                "No active games.\n\nn = start a game   a = add player   X = reset all data",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
            area,
        );
        return;
    };
    let game = game.clone();

    let [header, key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(area);

    f.render_widget(
        Paragraph::new(format!(
            "{} | {} | {} vs {}",
            game.game_id,
            game.date,
            game.team1_players.join(", "),
            game.team2_players.join(", ")
        )),
        header,
    );
    f.render_widget(
        Paragraph::new(
            "Keys: j/k=field  h/l=value  Enter=record  g=game  n=new  e=end  u=undo  a=player  X=reset",
        )
        .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let mut form_area = content;
    let mut side_area: Option<Rect> = None;
    if content.width >= 80 {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(content);
        form_area = left;
        side_area = Some(right);
    }

    let open = game.open_innings();
    if open.is_empty() {
        f.render_widget(
            Paragraph::new("All innings have been ended for this game.\nPress e to end it.")
                .style(Style::default().fg(Color::Yellow)),
            form_area,
        );
    } else {
        let roster = app.state.selected_game_roster();
        let form = &app.state.scorebook.form;
        let outcome = form.outcome();

        let inning = open[form.inning_idx.min(open.len() - 1)];
        let batter = roster_entry(&game, &roster, form.batter_idx);
        let pitcher = roster_entry(&game, &roster, form.pitcher_idx);

        let mut lines = Vec::new();
        for field in [
            AtBatField::Inning,
            AtBatField::Batter,
            AtBatField::Pitcher,
            AtBatField::Strikes,
            AtBatField::Balls,
            AtBatField::RunnersOn,
            AtBatField::Outcome,
            AtBatField::Rbi,
            AtBatField::EndInning,
        ] {
            let value = match field {
                AtBatField::Inning => inning.to_string(),
                AtBatField::Batter => batter.clone(),
                AtBatField::Pitcher => pitcher.clone(),
                AtBatField::Strikes => form.strikes.to_string(),
                AtBatField::Balls => form.balls.to_string(),
                AtBatField::RunnersOn => form.runners_on.to_string(),
                AtBatField::Outcome => outcome.label().to_string(),
                AtBatField::Rbi => {
                    if outcome.rbi_is_editable() {
                        form.rbi.to_string()
                    } else {
                        format!("{} (fixed)", form.rbi)
                    }
                }
                AtBatField::EndInning => {
                    if form.end_inning { "[x]".to_string() } else { "[ ]".to_string() }
                }
            };
            let focused = form.field == field;
            let marker = if focused { '>' } else { ' ' };
            let style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{marker} {:<16} {value}", field.label()),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Outs recorded on this play: {}", outcome.outs_recorded()),
            Style::default().fg(Color::Gray),
        )));
        f.render_widget(Paragraph::new(lines), form_area);
    }

    if let Some(side) = side_area {
        draw_game_side_panel(f, side, app, &game);
    }
}

/// Roster entries are shown with their side, mirroring the original's
/// "Team 1 - name" select labels.
fn roster_entry(game: &Game, roster: &[String], idx: usize) -> String {
    if roster.is_empty() {
        return "-".to_string();
    }
    let name = &roster[idx.min(roster.len() - 1)];
    let side = if game.team1_players.contains(name) { "Team 1" } else { "Team 2" };
    format!("{side} - {name}")
}

fn draw_game_side_panel(f: &mut Frame, area: Rect, app: &App, game: &Game) {
    let block = default_border(Color::DarkGray).title(format!(" {} ", game.game_id));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let plays = stats::scoring_plays(game, &app.state.snapshot.atbats);
    let (team1_runs, team2_runs) =
        plays.last().map(|p| (p.team1_total, p.team2_total)).unwrap_or((0, 0));

    let mut lines = Vec::new();
    lines.push(Line::from(format!(
        "Score: Team 1 {team1_runs} - {team2_runs} Team 2"
    )));
    lines.push(Line::from(Span::styled(
        format!("Ended innings: {}", join_labels(&game.ended_innings)),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Recent at-bats:",
        Style::default().fg(Color::Gray),
    )));

    let game_atbats: Vec<_> = app
        .state
        .snapshot
        .atbats
        .iter()
        .filter(|ab| ab.game_id == game.game_id)
        .collect();
    let budget = inner.height.saturating_sub(lines.len() as u16) as usize;
    if game_atbats.is_empty() {
        lines.push(Line::from(Span::styled(
            "none yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for ab in game_atbats.iter().rev().take(budget.max(1)) {
        let rbi = if ab.rbi > 0 { format!("  +{} RBI", ab.rbi) } else { String::new() };
        lines.push(Line::from(format!(
            "{}  {} vs {}: {}{}",
            ab.inning, ab.batter, ab.pitcher, ab.outcome, rbi
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn join_labels(labels: &[wiffle_league::InningLabel]) -> String {
    if labels.is_empty() {
        return "none".to_string();
    }
    labels.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

fn draw_start_game(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.scorebook.start_form;
    let mut lines = Vec::new();
    lines.push(Line::from(format!("Start a new game — date {} ([/] to change)", form.date)));
    lines.push(Line::from(Span::styled(
        "Keys: j/k=move  1=toggle Team 1  2=toggle Team 2  Enter=start  Esc=back",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if app.state.snapshot.players.is_empty() {
        lines.push(Line::from(Span::styled(
            "No players yet. Esc, then a to add some.",
            Style::default().fg(Color::Yellow),
        )));
    }

    for (idx, player) in app.state.snapshot.players.iter().enumerate() {
        let marker = if idx == form.cursor { '>' } else { ' ' };
        let (side, style) = match form.side_of(&player.name) {
            Some(true) => ("[Team 1]", Style::default().fg(Color::Green)),
            Some(false) => ("[Team 2]", Style::default().fg(Color::Cyan)),
            None => ("        ", Style::default().fg(Color::White)),
        };
        lines.push(Line::from(Span::styled(
            format!("{marker} {side} {}", player.name),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_end_game(f: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.state.selected_active_game() else {
        f.render_widget(
            Paragraph::new("No active games to end. Esc to go back.")
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };
    let form = &app.state.scorebook.end_form;

    let mut lines = Vec::new();
    lines.push(Line::from(format!("End {} — enter final scores", game.game_id)));
    lines.push(Line::from(Span::styled(
        "Keys: j/k=team  h/l=score  c=confirm  Enter=end game  Esc=back",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    for (idx, (roster, score)) in [
        (&game.team1_players, form.team1_score),
        (&game.team2_players, form.team2_score),
    ]
    .into_iter()
    .enumerate()
    {
        let marker = if form.field == idx { '>' } else { ' ' };
        let style = if form.field == idx {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("{marker} Team {}: {:>2}   ({})", idx + 1, score, roster.join(", ")),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(confirm_line(form.confirm, "I confirm the final score."));
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_undo_confirm(f: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.state.selected_active_game() else {
        f.render_widget(
            Paragraph::new("No active game selected. Esc to go back.")
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };

    let last = app
        .state
        .snapshot
        .atbats
        .iter()
        .rev()
        .find(|ab| ab.game_id == game.game_id);

    let text = match last {
        Some(ab) => format!(
            "Undo last at-bat of {}?\n\n{} vs {} | Outcome: {}\n\ny = undo   n/Esc = keep it",
            game.game_id, ab.batter, ab.pitcher, ab.outcome
        ),
        None => format!("No at-bats recorded for {} yet.\n\nEsc to go back.", game.game_id),
    };
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        area,
    );
}

fn draw_add_player(f: &mut Frame, area: Rect, app: &App) {
    let text = format!(
        "Add new player\n\n> {}_\n\nEnter = add   Esc = back",
        app.state.scorebook.add_player_input
    );
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_reset(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.scorebook.reset_form;
    let masked: String = "*".repeat(form.password.chars().count());
    let mut lines = vec![
        Line::from(Span::styled(
            "Reset ALL league data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Admin password: {masked}_")),
        Line::from(""),
        confirm_line(form.confirm, "I confirm I want to reset all data. (Tab)"),
        Line::from(""),
        Line::from(Span::styled(
            "Enter = reset   Esc = back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if form.confirm {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Players, games and at-bats will all be deleted.",
            Style::default().fg(Color::Red),
        )));
    }
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn confirm_line(confirmed: bool, label: &str) -> Line<'static> {
    let mark = if confirmed { "[x]" } else { "[ ]" };
    let style = if confirmed {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(format!("{mark} {label}"), style))
}

// ---------------------------------------------------------------------------
// Player dashboard
// ---------------------------------------------------------------------------

fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Player Dashboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let players = &app.state.snapshot.players;
    if players.is_empty() {
        f.render_widget(
            Paragraph::new("No players yet. Add some on the Scorebook tab.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let idx = app.state.player_page.player_idx.min(players.len() - 1);
    let name = players[idx].name.clone();
    let (batting, pitching) = stats::player_lines(&app.state.snapshot, &name);

    let [header, cards_area, logs_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(cards_height(&batting, &pitching)),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(format!(
            "{name}  ({idx_plus}/{total})   h/l=player  j/k=scroll logs",
            idx_plus = idx + 1,
            total = players.len()
        )),
        header,
    );

    let [hit_area, pitch_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(cards_area);
    f.render_widget(hitting_cards(&batting), hit_area);
    f.render_widget(pitching_cards(&pitching), pitch_area);

    draw_player_logs(f, logs_area, app, &name);
}

fn cards_height(batting: &BattingLine, pitching: &PitchingLine) -> u16 {
    hitting_cards(batting)
        .preferred_height()
        .max(pitching_cards(pitching).preferred_height())
}

fn hitting_cards(line: &BattingLine) -> StatCards<'static> {
    StatCards {
        title: "Career Hitting",
        entries: vec![
            ("Games".into(), line.games.to_string()),
            ("At-Bats".into(), line.at_bats.to_string()),
            ("Hits".into(), line.hits.to_string()),
            ("AVG".into(), fmt3(line.avg())),
            ("OBP".into(), fmt3(line.obp())),
            ("SLG".into(), fmt3(line.slg())),
            ("OPS".into(), fmt3(line.ops())),
            ("XBH".into(), line.xbh().to_string()),
            ("RBIs".into(), line.rbi.to_string()),
            ("Walks".into(), line.walks.to_string()),
            ("Strikeouts".into(), line.strikeouts.to_string()),
            ("Singles".into(), line.singles.to_string()),
            ("Doubles".into(), line.doubles.to_string()),
            ("Triples".into(), line.triples.to_string()),
            ("Home Runs".into(), line.home_runs.to_string()),
            ("K%".into(), format!("{:.2}", line.k_rate())),
        ],
    }
}

fn pitching_cards(line: &PitchingLine) -> StatCards<'static> {
    StatCards {
        title: "Career Pitching",
        entries: vec![
            ("Games".into(), line.games.to_string()),
            ("IP".into(), format!("{:.1}", line.innings_pitched())),
            ("Earned Runs".into(), line.earned_runs.to_string()),
            ("ERA".into(), format!("{:.2}", line.era())),
            ("Outs".into(), line.outs.to_string()),
            ("Hits Allowed".into(), line.hits.to_string()),
            ("Walks".into(), line.walks.to_string()),
            ("Strikeouts".into(), line.strikeouts.to_string()),
            ("HR Allowed".into(), line.home_runs.to_string()),
            ("Double Plays".into(), line.double_plays.to_string()),
            ("Triple Plays".into(), line.triple_plays.to_string()),
            ("K%".into(), format!("{:.1}%", line.k_rate())),
            ("WHIP".into(), format!("{:.2}", line.whip())),
            ("K/9".into(), format!("{:.2}", line.k_per_9())),
            ("HR/9".into(), format!("{:.2}", line.hr_per_9())),
            ("Strikes".into(), line.strikes_thrown.to_string()),
            ("Balls".into(), line.balls_thrown.to_string()),
        ],
    }
}

fn draw_player_logs(f: &mut Frame, area: Rect, app: &App, name: &str) {
    let snapshot = &app.state.snapshot;
    let hitting = stats::batting_game_log(&snapshot.atbats, &snapshot.games, name);
    let pitching = stats::pitching_game_log(&snapshot.atbats, &snapshot.games, name);

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        "Hitting game log:",
        Style::default().fg(Color::Gray),
    )));
    if hitting.is_empty() {
        lines.push(dim_line("no hitting data yet"));
    }
    for row in &hitting {
        lines.push(Line::from(format!(
            "{}  {}  AB {}  H {}  HR {}  BB {}  K {}  RBI {}  AVG {}  SLG {}",
            fmt_date(row.date),
            row.game_id,
            row.line.at_bats,
            row.line.hits,
            row.line.home_runs,
            row.line.walks,
            row.line.strikeouts,
            row.line.rbi,
            fmt3(row.line.avg()),
            fmt3(row.line.slg()),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Pitching game log:",
        Style::default().fg(Color::Gray),
    )));
    if pitching.is_empty() {
        lines.push(dim_line("no pitching data yet"));
    }
    for row in &pitching {
        lines.push(Line::from(format!(
            "{}  {}  IP {:.1}  ER {}  BB {}  K {}  HR {}  ERA {:.2}  WHIP {:.2}",
            fmt_date(row.date),
            row.game_id,
            row.line.innings_pitched(),
            row.line.earned_runs,
            row.line.walks,
            row.line.strikeouts,
            row.line.home_runs,
            row.line.era(),
            row.line.whip(),
        )));
    }

    let offset = usize::from(app.state.player_page.scroll_offset).min(lines.len().saturating_sub(1));
    let window: Vec<Line> = lines.into_iter().skip(offset).collect();
    f.render_widget(Paragraph::new(window), area);
}

// ---------------------------------------------------------------------------
// Matchups
// ---------------------------------------------------------------------------

fn draw_matchups(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Player Matchups ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let players = &app.state.snapshot.players;
    if players.len() < 2 {
        f.render_widget(
            Paragraph::new("Matchups need at least two players.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let state = &app.state.matchup;
    let p1 = players[state.batter_idx.min(players.len() - 1)].name.clone();
    let p2 = players[state.pitcher_idx.min(players.len() - 1)].name.clone();

    let [header, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let slot = |name: &str, focused: bool| {
        Span::styled(
            format!(" {name} "),
            if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            },
        )
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(vec![slot(&p1, state.focus == 0), Span::raw("vs"), slot(&p2, state.focus == 1)]),
            Line::from(Span::styled(
                "Keys: Tab/h/l=slot  j/k=player",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        header,
    );

    if p1 == p2 {
        f.render_widget(
            Paragraph::new("Please select two different players.")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(content);
    draw_matchup_side(f, left, app, &p1, &p2);
    draw_matchup_side(f, right, app, &p2, &p1);
}

/// One player's half of the head-to-head view: their hitting against the
/// other, and their pitching against the other.
fn draw_matchup_side(f: &mut Frame, area: Rect, app: &App, subject: &str, opponent: &str) {
    let block = default_border(Color::DarkGray).title(format!(" {subject} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let atbats = &app.state.snapshot.atbats;
    let hitting = BattingLine::from_atbats(matchup(atbats, subject, opponent));
    let pitching = PitchingLine::from_atbats(matchup(atbats, opponent, subject));

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("Hitting vs {opponent}"),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(format!(
        "AB {}  H {}  1B {}  2B {}  3B {}  HR {}",
        hitting.at_bats, hitting.hits, hitting.singles, hitting.doubles, hitting.triples,
        hitting.home_runs
    )));
    lines.push(Line::from(format!(
        "BB {}  K {}  RBI {}  AVG {}  OBP {}  SLG {}",
        hitting.walks,
        hitting.strikeouts,
        hitting.rbi,
        fmt3(hitting.avg()),
        fmt3(hitting.obp()),
        fmt3(hitting.slg()),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Pitching vs {opponent}"),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(format!(
        "BF {}  IP {:.1}  H {}  BB {}  K {}  HR {}",
        pitching.batters_faced,
        pitching.innings_pitched(),
        pitching.hits,
        pitching.walks,
        pitching.strikeouts,
        pitching.home_runs
    )));
    lines.push(Line::from(format!(
        "ER {}  ERA {:.2}  WHIP {:.2}  K/9 {:.2}  K% {:.1}",
        pitching.earned_runs,
        pitching.era(),
        pitching.whip(),
        pitching.k_per_9(),
        pitching.k_rate(),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

fn draw_leaders(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" League Leaders ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let stat = app.state.leaders.stat;
    let rows = stats::leaderboard(&app.state.snapshot.players, &app.state.snapshot.atbats, stat);

    let mut lines = Vec::new();
    let kind = if stat.is_pitching() { "Pitching" } else { "Hitting" };
    let direction = if stat.ascending() { "lowest first" } else { "highest first" };
    lines.push(Line::from(format!("{kind} — {} ({direction})", stat.label())));
    lines.push(Line::from(Span::styled(
        "Keys: h/l=stat",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if rows.is_empty() {
        lines.push(dim_line(
            "No data available for this stat yet. Play some games to see the standings!",
        ));
    }

    let last = rows.len().saturating_sub(1);
    for (rank, row) in rows.iter().enumerate() {
        // Top of the board green, bottom red, as on the web dashboard.
        let style = if rank == 0 {
            Style::default().fg(Color::Green)
        } else if rank == last && rows.len() > 1 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("#{:<3} {:<20} {}", rank + 1, row.player, fmt_stat(stat, row.value)),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn fmt_stat(stat: LeaderStat, value: f64) -> String {
    match stat {
        LeaderStat::Avg | LeaderStat::Obp => fmt3(value),
        LeaderStat::Era | LeaderStat::Whip => format!("{value:.2}"),
        LeaderStat::HittingKRate | LeaderStat::PitchingKRate => format!("{value:.2}%"),
        _ => format!("{}", value as u32),
    }
}

// ---------------------------------------------------------------------------
// Match history + standings
// ---------------------------------------------------------------------------

fn draw_games(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Match History ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let year_label = app
        .state
        .game_log_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "all seasons".to_string());
    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!("Season: {year_label}")),
            Line::from(Span::styled(
                "Keys: j/k=game  y=season  p/Enter=scoring plays",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        header,
    );

    let [list_area, side_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(content);

    let games = app.state.games_by_date_desc();
    let selected = app.state.game_log.game_idx.min(games.len().saturating_sub(1));

    let mut lines = Vec::new();
    if games.is_empty() {
        lines.push(dim_line("No games recorded yet."));
    }
    for (idx, game) in games.iter().enumerate() {
        let marker = if idx == selected { '>' } else { ' ' };
        let line = match game.status {
            GameStatus::Active => Line::from(Span::styled(
                format!("{marker} {}  {}  in progress", game.game_id, game.date),
                Style::default().fg(Color::Yellow),
            )),
            GameStatus::Completed => {
                let team1_score = game.team1_score.unwrap_or(0);
                let team2_score = game.team2_score.unwrap_or(0);
                let (team1_style, team2_style) = match game.decision() {
                    Some(Decision::Team1) => (Color::Green, Color::Red),
                    Some(Decision::Team2) => (Color::Red, Color::Green),
                    _ => (Color::White, Color::White),
                };
                Line::from(vec![
                    Span::raw(format!("{marker} {}  {}  ", game.game_id, game.date)),
                    Span::styled(
                        format!("{} {team1_score}", game.team1_players.join(", ")),
                        Style::default().fg(team1_style),
                    ),
                    Span::raw(" - "),
                    Span::styled(
                        format!("{team2_score} {}", game.team2_players.join(", ")),
                        Style::default().fg(team2_style),
                    ),
                ])
            }
        };
        lines.push(line);
    }
    f.render_widget(Paragraph::new(lines), list_area);

    if app.state.game_log.show_plays {
        if let Some(game) = games.get(selected) {
            draw_scoring_plays(f, side_area, app, game);
        }
    } else {
        draw_standings(f, side_area, app);
    }
}

fn draw_scoring_plays(f: &mut Frame, area: Rect, app: &App, game: &Game) {
    let block = default_border(Color::DarkGray).title(format!(" Scoring Plays — {} ", game.game_id));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let plays = stats::scoring_plays(game, &app.state.snapshot.atbats);
    let mut lines = Vec::new();
    if plays.is_empty() {
        lines.push(dim_line("No scoring plays recorded for this game."));
    }
    for play in &plays {
        lines.push(Line::from(format!(
            "{}  {} — {} (+{})  {}-{}",
            play.inning, play.batter, play.outcome, play.rbi, play.team1_total, play.team2_total
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Player W/L Records ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = stats::standings(&app.state.snapshot.games, app.state.game_log_year());
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("{:<16} {:>3} {:>3} {:>3} {:>6}", "Player", "W", "L", "D", "Win%"),
        Style::default().fg(Color::Gray),
    )));
    if rows.is_empty() {
        lines.push(dim_line("No completed games yet."));
    }
    for row in &rows {
        lines.push(Line::from(format!(
            "{:<16} {:>3} {:>3} {:>3} {:>6}",
            row.player,
            row.wins,
            row.losses,
            row.draws,
            format!("{:.2}", row.win_pct()),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Help, status, logs
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = "Tabs: 1=Scorebook  2=Player  3=Matchups  4=Leaders  5=Games\n\
\n\
Scorebook: j/k=field  h/l=value  Enter=record at-bat  g=next game\n\
           n=start game  e=end game  u=undo last at-bat  a=add player  X=reset all\n\
Player:    h/l=player  j/k=scroll game logs\n\
Matchups:  Tab=slot  j/k=player\n\
Leaders:   h/l=stat (sort order flips per stat)\n\
Games:     j/k=game  y=season filter  p=scoring plays\n\
\n\
Global: f=full screen  \"=logs  q=quit  Esc=back";
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let Some(status) = app.state.status.as_ref() else {
        return;
    };
    let style = if status.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    f.render_widget(Paragraph::new(status.text.as_str()).style(style), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let height = area.height.min(10);
    let logs_area = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(height),
        area.width,
        height,
    );
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, logs_area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Rate stats the baseball way: three decimals, no leading zero (".473").
fn fmt3(value: f64) -> String {
    let mut s = format!("{value:.3}");
    if value < 1.0 {
        s.remove(0);
    }
    s
}

fn fmt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "----------".to_string())
}

fn dim_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_owned(), Style::default().fg(Color::DarkGray)))
}
