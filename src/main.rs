fn main() {
    combat_sim::game::run();
}
